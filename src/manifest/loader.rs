//! Loading a task file: locate, decode, resolve variables

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use super::locator::{locate_task_file, DEFAULT_TASK_FILE};
use super::model::{Configs, Step};
use super::validator::{validate_manifest, ValidationError};
use crate::env::{interpolate, resolve_assignment, EnvResolver, DEFAULT_ENV_FILE};
use crate::error::{DunnerError, Result};
use crate::probe::FsProbe;

/// Where to read the task file and dotenv file from
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub task_file: PathBuf,
    pub env_file: PathBuf,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            task_file: PathBuf::from(DEFAULT_TASK_FILE),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
        }
    }
}

/// A decoded task file with every variable resolved
#[derive(Debug, Clone)]
pub struct Manifest {
    /// File the manifest was read from
    pub path: PathBuf,
    pub configs: Configs,
}

impl Manifest {
    /// Locate, read and resolve the task file described by `options`
    pub fn load(options: &LoadOptions, fs: &dyn FsProbe) -> Result<Self> {
        let path = locate_task_file(&options.task_file, fs)?;
        info!(path = %path.display(), "reading task file");

        let text = fs::read_to_string(&path).map_err(|cause| DunnerError::TaskFileRead {
            path: path.clone(),
            cause,
        })?;
        let resolver = EnvResolver::load(&options.env_file);

        Self::from_text(path, &text, &resolver)
    }

    /// Decode and resolve `text` with an already built resolver
    pub fn from_text(path: PathBuf, text: &str, resolver: &EnvResolver) -> Result<Self> {
        let mut configs = Configs::from_yaml(text)?;
        resolve_configs(&mut configs, resolver)?;
        debug!(tasks = configs.tasks.len(), "resolved task file");

        Ok(Self { path, configs })
    }

    /// Run every validation rule and collect the failures
    pub fn validate(&self, fs: &dyn FsProbe) -> Vec<ValidationError> {
        validate_manifest(&self.configs, fs)
    }

    /// Load and fail unless the manifest validates cleanly
    pub fn load_validated(options: &LoadOptions, fs: &dyn FsProbe) -> Result<Self> {
        let manifest = Self::load(options, fs)?;
        let errors = manifest.validate(fs);
        if !errors.is_empty() {
            return Err(DunnerError::Validation(errors));
        }
        Ok(manifest)
    }
}

/// Resolve assignments at every scope, then directives in step fields
pub fn resolve_configs(configs: &mut Configs, resolver: &EnvResolver) -> Result<()> {
    resolve_envs(&mut configs.envs, resolver)?;

    for (task_name, task) in configs.tasks.iter_mut() {
        resolve_envs(&mut task.envs, resolver).map_err(|e| in_task(task_name, "envs", e))?;
        for step in task.steps.iter_mut() {
            resolve_envs(&mut step.envs, resolver).map_err(|e| in_task(task_name, "envs", e))?;
            resolve_step_fields(step, resolver, task_name)?;
        }
    }

    Ok(())
}

fn resolve_envs(envs: &mut [String], resolver: &EnvResolver) -> Result<()> {
    for env in envs.iter_mut() {
        *env = resolve_assignment(env, resolver)?;
    }
    Ok(())
}

/// Expand directives in `dir`, the source of each mount, and `user`
pub fn resolve_step_fields(
    step: &mut Step,
    resolver: &EnvResolver,
    task_name: &str,
) -> Result<()> {
    if let Some(dir) = step.dir.as_mut() {
        *dir = interpolate(dir, resolver).map_err(|e| in_task(task_name, "dir", e))?;
    }
    for mount in step.mounts.iter_mut() {
        *mount = interpolate_mount_source(mount, resolver)
            .map_err(|e| in_task(task_name, "mounts", e))?;
    }
    if let Some(user) = step.user.as_mut() {
        *user = interpolate(user, resolver).map_err(|e| in_task(task_name, "user", e))?;
    }
    Ok(())
}

fn interpolate_mount_source(mount: &str, resolver: &EnvResolver) -> Result<String> {
    match mount.split_once(':') {
        Some((source, rest)) => Ok(format!("{}:{}", interpolate(source, resolver)?, rest)),
        None => interpolate(mount, resolver),
    }
}

fn in_task(task: &str, field: &'static str, source: DunnerError) -> DunnerError {
    DunnerError::FieldResolution {
        task: task.to_string(),
        field,
        cause: Box::new(source),
    }
}
