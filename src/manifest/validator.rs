//! Manifest validation
//!
//! Runs a structural pass over the whole file, then the step rules task by
//! task so each message names the task it came from. Nothing short-circuits:
//! every problem in the file is reported in one run.

use serde::Serialize;
use tracing::debug;

use super::model::Configs;
use super::rules::{is_valid_assignment, RuleContext, RuleTag, STEP_RULES};
use crate::probe::FsProbe;

/// One failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Owning task, when the failure is inside one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    pub field: &'static str,
    pub rule: RuleTag,
    pub value: String,
    pub message: String,
}

impl ValidationError {
    fn new(task: Option<&str>, field: &'static str, rule: RuleTag, value: &str) -> Self {
        Self {
            task: task.map(str::to_string),
            field,
            rule,
            value: value.to_string(),
            message: rule.render(field, value),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.task {
            Some(task) => write!(f, "task '{}': {}", task, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a whole task file
pub fn validate_manifest(configs: &Configs, fs: &dyn FsProbe) -> Vec<ValidationError> {
    let mut errors = validate_structure(configs);

    for (task_name, task) in &configs.tasks {
        for step in &task.steps {
            let ctx = RuleContext { configs, step, fs };
            validate_step(&ctx, task_name, &mut errors);
        }
    }

    debug!(errors = errors.len(), tasks = configs.tasks.len(), "validated task file");
    errors
}

fn validate_structure(configs: &Configs) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if configs.tasks.is_empty() {
        errors.push(ValidationError::new(None, "tasks", RuleTag::Required, ""));
    }
    check_envs(&configs.envs, None, &mut errors);

    for (task_name, task) in &configs.tasks {
        if task.steps.is_empty() {
            errors.push(ValidationError::new(
                Some(task_name.as_str()),
                "steps",
                RuleTag::Required,
                "",
            ));
        }
        check_envs(&task.envs, Some(task_name.as_str()), &mut errors);
        for step in &task.steps {
            check_envs(&step.envs, Some(task_name.as_str()), &mut errors);
        }
    }

    errors
}

fn check_envs(envs: &[String], task: Option<&str>, errors: &mut Vec<ValidationError>) {
    for raw in envs.iter().filter(|raw| !is_valid_assignment(raw)) {
        errors.push(ValidationError::new(task, "envs", RuleTag::EnvFormat, raw));
    }
}

fn validate_step(ctx: &RuleContext<'_>, task: &str, errors: &mut Vec<ValidationError>) {
    for field in STEP_RULES {
        for value in (field.values)(ctx.step) {
            if let Some(rule) = field.rules.iter().find(|rule| !(rule.check)(ctx, value)) {
                errors.push(ValidationError::new(Some(task), field.field, rule.tag, value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::model::{Step, Task};
    use crate::probe::HostFs;
    use tempfile::TempDir;

    fn configs_with(name: &str, steps: Vec<Step>) -> Configs {
        let mut configs = Configs::default();
        configs.tasks.insert(
            name.to_string(),
            Task {
                envs: Vec::new(),
                steps,
            },
        );
        configs
    }

    #[test]
    fn test_valid_manifest() {
        let configs = Configs::from_yaml(
            "build:\n  steps:\n    - image: node\n      command: [\"node\", \"--version\"]\n",
        )
        .unwrap();
        let errors = validate_manifest(&configs, &HostFs);
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_bad_mount_mode() {
        let configs = configs_with(
            "build",
            vec![Step {
                image: Some("node".to_string()),
                mounts: vec!["./src:/app:x".to_string()],
                ..Default::default()
            }],
        );
        let errors = validate_manifest(&configs, &HostFs);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, RuleTag::MountDir);
        assert_eq!(errors[0].field, "mounts");
        assert_eq!(
            errors[0].to_string(),
            "task 'build': mount directory './src:/app:x' is invalid. Check format is \
             '<valid_src_dir>:<valid_dest_dir>:<optional_mode>' and has right permission level"
        );
    }

    #[test]
    fn test_missing_mount_source() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");
        let mount = format!("{}:/app", missing.display());
        let configs = configs_with(
            "build",
            vec![Step {
                image: Some("node".to_string()),
                mounts: vec![mount.clone()],
                ..Default::default()
            }],
        );
        let errors = validate_manifest(&configs, &HostFs);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, RuleTag::ParseDir);
        assert_eq!(errors[0].value, mount);
    }

    #[test]
    fn test_missing_follow_task() {
        let configs = configs_with(
            "build",
            vec![Step {
                follow: Some("missing-task".to_string()),
                ..Default::default()
            }],
        );
        let errors = validate_manifest(&configs, &HostFs);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, RuleTag::FollowExist);
        assert_eq!(
            errors[0].to_string(),
            "task 'build': follow task 'missing-task' does not exist"
        );
    }

    #[test]
    fn test_follow_only_step_passes() {
        let mut configs = configs_with(
            "ci",
            vec![Step {
                follow: Some(" build ".to_string()),
                ..Default::default()
            }],
        );
        configs.tasks.insert(
            "build".to_string(),
            Task {
                envs: Vec::new(),
                steps: vec![Step {
                    image: Some("node".to_string()),
                    ..Default::default()
                }],
            },
        );
        let errors = validate_manifest(&configs, &HostFs);
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_step_without_image_or_follow() {
        let configs = configs_with("build", vec![Step::default()]);
        let errors = validate_manifest(&configs, &HostFs);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, RuleTag::RequiredWithout);
        assert_eq!(errors[0].field, "image");
    }

    #[test]
    fn test_same_error_in_two_tasks_is_distinguishable() {
        let mut configs = configs_with("a", vec![Step::default()]);
        configs.tasks.insert(
            "b".to_string(),
            Task {
                envs: Vec::new(),
                steps: vec![Step::default()],
            },
        );
        let errors = validate_manifest(&configs, &HostFs);
        let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(errors.len(), 2);
        assert!(rendered[0].starts_with("task 'a': "));
        assert!(rendered[1].starts_with("task 'b': "));
    }

    #[test]
    fn test_all_errors_collected() {
        let configs = configs_with(
            "build",
            vec![
                Step::default(),
                Step {
                    image: Some("node".to_string()),
                    mounts: vec!["only-one".to_string(), "./src:/app:zz".to_string()],
                    follow: Some("nope".to_string()),
                    ..Default::default()
                },
            ],
        );
        let errors = validate_manifest(&configs, &HostFs);
        let tags: Vec<RuleTag> = errors.iter().map(|e| e.rule).collect();
        assert_eq!(
            tags,
            vec![
                RuleTag::RequiredWithout,
                RuleTag::MountDir,
                RuleTag::MountDir,
                RuleTag::FollowExist,
            ]
        );
    }

    #[test]
    fn test_structural_errors() {
        let mut configs = configs_with("empty", Vec::new());
        configs.envs.push("NOEQUALS".to_string());
        let errors = validate_manifest(&configs, &HostFs);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].rule, RuleTag::EnvFormat);
        assert_eq!(errors[0].task, None);
        assert_eq!(errors[1].to_string(), "task 'empty': steps is a required field");

        let errors = validate_manifest(&Configs::default(), &HostFs);
        assert_eq!(errors[0].to_string(), "tasks is a required field");
    }
}
