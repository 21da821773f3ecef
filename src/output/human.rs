//! Human-readable output formatting

use crate::container::ContainerStep;
use crate::output::formatter::Report;

pub fn format_human(report: &Report<'_>) -> String {
    match report {
        Report::Validation { path, errors } => {
            if errors.is_empty() {
                return format!("{}: OK", path.display());
            }
            let mut output = format!("{}: {} error(s)\n", path.display(), errors.len());
            for err in errors.iter() {
                output.push_str(&format!("  - {}\n", err));
            }
            output.trim_end().to_string()
        }
        Report::Tasks(configs) => {
            let mut output = String::from("Tasks\n-----\n");
            for (name, task) in &configs.tasks {
                output.push_str(&format!("  {} ({} steps)\n", name, task.steps.len()));
            }
            output.trim_end().to_string()
        }
        Report::Plan(plan) => {
            let mut output = format!(
                "Task '{}' ({} steps{})\n",
                plan.task,
                plan.steps.len(),
                if plan.asynchronous { ", async" } else { "" }
            );
            for step in &plan.steps {
                output.push_str(&format_step(step));
            }
            output.trim_end().to_string()
        }
    }
}

fn format_step(step: &ContainerStep) -> String {
    let mut output = format!("\n{}\n  Image:   {}\n", step.name, step.image);
    if !step.command.is_empty() {
        output.push_str(&format!("  Command: {}\n", step.command.join(" ")));
    }
    output.push_str(&format!("  Dir:     {}\n", step.work_dir));
    if let Some(user) = &step.user {
        output.push_str(&format!("  User:    {}\n", user));
    }
    for env in step.env_list() {
        output.push_str(&format!("  Env:     {}\n", env));
    }
    for mount in &step.mounts {
        output.push_str(&format!(
            "  Mount:   {} -> {} ({})\n",
            mount.source.display(),
            mount.target,
            if mount.read_only { "ro" } else { "rw" }
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TaskPlan;
    use crate::manifest::Configs;
    use std::path::Path;

    #[test]
    fn test_validation_ok() {
        let report = Report::Validation {
            path: Path::new("tasks.yaml"),
            errors: &[],
        };
        assert_eq!(format_human(&report), "tasks.yaml: OK");
    }

    #[test]
    fn test_plan_output() {
        let configs = Configs::from_yaml(
            "build:\n  steps:\n    - image: node\n      command: [npm, test]\n      \
             mounts: [\"/src:/app:w\"]\n",
        )
        .unwrap();
        let plan = TaskPlan::build(&configs, "build", false).unwrap();
        let out = format_human(&Report::Plan(&plan));
        assert!(out.starts_with("Task 'build' (1 steps)"));
        assert!(out.contains("Command: npm test"));
        assert!(out.contains("Dir:     /dunner"));
        assert!(out.contains("Mount:   /src -> /app (rw)"));
    }
}
