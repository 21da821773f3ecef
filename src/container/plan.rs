//! Expanding a task into the container steps it runs
//!
//! Steps with a `follow` reference are replaced by the steps of the task
//! they name, recursively.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::step::{merge_envs, ContainerStep};
use crate::error::{DunnerError, Result};
use crate::manifest::Configs;

/// Ordered container steps for one task
#[derive(Debug, Clone, Serialize)]
pub struct TaskPlan {
    pub task: String,
    /// Steps may run concurrently downstream
    #[serde(rename = "async")]
    pub asynchronous: bool,
    pub steps: Vec<ContainerStep>,
}

impl TaskPlan {
    /// Expand `task` from a validated task file
    pub fn build(configs: &Configs, task: &str, asynchronous: bool) -> Result<Self> {
        let mut steps = Vec::new();
        let mut chain = Vec::new();
        expand_task(configs, task, &mut chain, &mut steps)?;
        debug!(task, steps = steps.len(), "built task plan");

        Ok(Self {
            task: task.to_string(),
            asynchronous,
            steps,
        })
    }
}

fn expand_task(
    configs: &Configs,
    name: &str,
    chain: &mut Vec<String>,
    out: &mut Vec<ContainerStep>,
) -> Result<()> {
    if chain.iter().any(|t| t == name) {
        let mut cycle = chain.clone();
        cycle.push(name.to_string());
        return Err(DunnerError::FollowCycle(cycle));
    }
    let task = configs
        .task(name)
        .ok_or_else(|| DunnerError::UnknownTask(name.to_string()))?;

    let mut base_env = BTreeMap::new();
    merge_envs(&mut base_env, &configs.envs)?;
    merge_envs(&mut base_env, &task.envs)?;

    chain.push(name.to_string());
    for (index, step) in task.steps.iter().enumerate() {
        match step.follow() {
            Some(follow) => expand_task(configs, follow, chain, out)?,
            None => out.push(ContainerStep::from_step(name, index, step, &base_env)?),
        }
    }
    chain.pop();

    Ok(())
}
