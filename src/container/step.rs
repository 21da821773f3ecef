//! Container step descriptor
//!
//! A ContainerStep is everything the container runtime needs to run one
//! step: image, command, environment, working directory, user and mounts.

use std::collections::BTreeMap;

use serde::Serialize;

use super::mount::{decode_mounts, project_mount, Mount, MountConsumer, PROJECT_MOUNT_TARGET};
use crate::error::{DunnerError, Result};
use crate::manifest::Step;

/// A resolved step ready for container creation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerStep {
    /// Task the step was declared in
    pub task: String,
    /// `<task>[<index>]`
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub env: BTreeMap<String, String>,
    /// Step `dir`, or the project mount when unset
    pub work_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub mounts: Vec<Mount>,
}

impl ContainerStep {
    /// Build the descriptor for `step`, the `index`-th step of `task`.
    ///
    /// `base_env` holds the global and task assignments; the step's own
    /// assignments override them.
    pub fn from_step(
        task: &str,
        index: usize,
        step: &Step,
        base_env: &BTreeMap<String, String>,
    ) -> Result<Self> {
        let mut env = base_env.clone();
        merge_envs(&mut env, &step.envs)?;

        let mut container_step = Self {
            task: task.to_string(),
            name: format!("{}[{}]", task, index),
            image: step.image().unwrap_or_default().to_string(),
            command: step.command.clone(),
            env,
            work_dir: step
                .dir
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| PROJECT_MOUNT_TARGET.to_string()),
            user: step.user.clone().filter(|u| !u.is_empty()),
            mounts: vec![project_mount()?],
        };
        decode_mounts(&step.mounts, &mut container_step)?;

        Ok(container_step)
    }

    /// Environment as `NAME=VALUE` strings, sorted by name
    pub fn env_list(&self) -> Vec<String> {
        self.env
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect()
    }
}

impl MountConsumer for ContainerStep {
    fn add_mounts(&mut self, mounts: Vec<Mount>) {
        self.mounts.extend(mounts);
    }
}

/// Fold resolved `NAME=VALUE` assignments into `env`, later entries winning
pub fn merge_envs(env: &mut BTreeMap<String, String>, assignments: &[String]) -> Result<()> {
    for raw in assignments {
        // resolved values may themselves contain `=`
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| DunnerError::InvalidAssignment(raw.clone()))?;
        env.insert(name.to_string(), value.to_string());
    }
    Ok(())
}
