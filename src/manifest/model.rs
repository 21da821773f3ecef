//! In-memory representation of a task file
//!
//! ```yaml
//! envs:
//!   - GLOBAL=1
//! build:
//!   envs:
//!     - API_KEY=`$SECRET`
//!   steps:
//!     - image: node
//!       command: ["node", "--version"]
//!       mounts:
//!         - "`$HOME`/src:/app:wr"
//!     - follow: lint
//! ```
//!
//! Every top-level key other than `envs` names a task.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The whole task file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configs {
    /// Assignments shared by every task
    #[serde(default)]
    pub envs: Vec<String>,

    /// Tasks keyed by name
    #[serde(flatten)]
    pub tasks: BTreeMap<String, Task>,
}

/// A named sequence of steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Assignments shared by every step of the task
    #[serde(default)]
    pub envs: Vec<String>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One containerized step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    /// Image reference; may be omitted when `follow` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub command: Vec<String>,

    pub envs: Vec<String>,

    /// Working directory inside the container
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Raw `source:target[:mode]` strings
    pub mounts: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Name of another task whose steps run in place of this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow: Option<String>,
}

impl Configs {
    /// Decode a task file from YAML text
    pub fn from_yaml(text: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Look up a task by name
    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// True if `name` is a task in this file
    pub fn has_task(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }
}

impl Step {
    /// Non-empty image, if any
    pub fn image(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }

    /// Non-empty follow reference, trimmed
    pub fn follow(&self) -> Option<&str> {
        non_empty(self.follow.as_deref().map(str::trim))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
