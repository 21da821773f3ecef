//! Dunner - a Docker based task runner
//!
//! This crate loads a task file, resolves `` `$NAME` `` references against a
//! dotenv file and the host environment, validates the result, and turns
//! tasks into container steps for the runtime to execute.
//!
//! # Example
//!
//! ```no_run
//! use dunner::{HostFs, LoadOptions, Manifest, TaskPlan};
//!
//! let manifest = Manifest::load_validated(&LoadOptions::default(), &HostFs).unwrap();
//! let plan = TaskPlan::build(&manifest.configs, "build", false).unwrap();
//! for step in &plan.steps {
//!     println!("{} -> {}", step.name, step.image);
//! }
//! ```

pub mod cli;
pub mod container;
pub mod env;
pub mod error;
pub mod manifest;
pub mod output;
pub mod probe;

pub use container::{ContainerStep, Mount, MountConsumer, TaskPlan};
pub use env::EnvResolver;
pub use error::{DunnerError, Result};
pub use manifest::{Configs, LoadOptions, Manifest, Step, Task, ValidationError};
pub use output::{format_output, OutputFormat, Report};
pub use probe::{FsProbe, HostFs};
