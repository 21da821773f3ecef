//! Environment variable resolution
//!
//! Variables come from a dotenv file and the host environment. Manifest
//! fields refer to them with `` `$NAME` `` directives.

pub mod directive;
pub mod resolver;

pub use directive::{interpolate, resolve_assignment, split_assignment};
pub use resolver::{EnvResolver, DEFAULT_ENV_FILE};
