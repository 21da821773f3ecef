//! JSON output formatting

use serde_json::{json, Value};

use crate::output::formatter::Report;

pub fn format_json(report: &Report<'_>) -> String {
    let data: Value = match report {
        Report::Validation { path, errors } => json!({
            "file": path.display().to_string(),
            "valid": errors.is_empty(),
            "errors": errors
                .iter()
                .map(|e| {
                    let mut value = serde_json::to_value(e).unwrap_or(json!(null));
                    if let Value::Object(map) = &mut value {
                        map.insert("display".to_string(), json!(e.to_string()));
                    }
                    value
                })
                .collect::<Vec<_>>(),
        }),
        Report::Tasks(configs) => {
            let tasks: Vec<Value> = configs
                .tasks
                .iter()
                .map(|(name, task)| json!({ "name": name, "steps": task.steps.len() }))
                .collect();
            json!({ "tasks": tasks })
        }
        Report::Plan(plan) => serde_json::to_value(plan).unwrap_or(json!(null)),
    };

    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Configs;
    use std::path::Path;

    #[test]
    fn test_tasks_json() {
        let configs = Configs::from_yaml("a:\n  steps:\n    - image: x\n    - image: y\n").unwrap();
        let out: Value = serde_json::from_str(&format_json(&Report::Tasks(&configs))).unwrap();
        assert_eq!(out["tasks"][0]["name"], "a");
        assert_eq!(out["tasks"][0]["steps"], 2);
    }

    #[test]
    fn test_validation_json() {
        let configs = Configs::from_yaml("a:\n  steps:\n    - follow: gone\n").unwrap();
        let errors = crate::manifest::validate_manifest(&configs, &crate::probe::HostFs);
        let report = Report::Validation {
            path: Path::new(".dunner.yaml"),
            errors: &errors,
        };
        let out: Value = serde_json::from_str(&format_json(&report)).unwrap();
        assert_eq!(out["valid"], false);
        assert_eq!(out["errors"][0]["rule"], "follow_exist");
        assert_eq!(out["errors"][0]["task"], "a");
        assert_eq!(out["errors"][0]["display"], "task 'a': follow task 'gone' does not exist");
    }
}
