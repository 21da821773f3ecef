//! Task file handling
//!
//! Finding the task file, decoding it, resolving variables and validating
//! the result before anything is executed.

pub mod loader;
pub mod locator;
pub mod model;
pub mod rules;
pub mod validator;

pub use loader::{resolve_configs, LoadOptions, Manifest};
pub use locator::{locate_task_file, search_upwards, DEFAULT_TASK_FILE};
pub use model::{Configs, Step, Task};
pub use rules::{RuleTag, DEFAULT_MOUNT_MODE, VALID_MOUNT_MODES};
pub use validator::{validate_manifest, ValidationError};
