//! Error types for Dunner

use std::path::PathBuf;
use thiserror::Error;

use crate::manifest::ValidationError;

#[derive(Error, Debug)]
pub enum DunnerError {
    #[error("failed to find Dunner task file '{0}'")]
    TaskFileNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to read task file '{}': {cause}", .path.display())]
    TaskFileRead { path: PathBuf, cause: std::io::Error },

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("config: invalid format of environment variable: {0}")]
    InvalidAssignment(String),

    #[error("config: could not find environment variable '{name}' in {env_file} file or among host environment variables")]
    EnvNotFound { name: String, env_file: String },

    #[error("could not find environment variable '{0}'")]
    DirectiveNotFound(String),

    #[error("task '{task}': {field}: {cause}")]
    FieldResolution {
        task: String,
        field: &'static str,
        cause: Box<DunnerError>,
    },

    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("invalid mount '{mount}': {reason}")]
    InvalidMount { mount: String, reason: String },

    #[error("could not resolve home directory for mount '{0}'")]
    HomeDirUnavailable(String),

    #[error("task '{0}' does not exist")]
    UnknownTask(String),

    #[error("follow cycle detected: {}", .0.join(" -> "))]
    FollowCycle(Vec<String>),
}

pub type Result<T> = std::result::Result<T, DunnerError>;
