//! Output formatting

use std::path::Path;

use crate::container::TaskPlan;
use crate::manifest::{Configs, ValidationError};
use crate::output::human::format_human;
use crate::output::json::format_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Something the CLI prints
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    /// Result of validating a task file
    Validation {
        path: &'a Path,
        errors: &'a [ValidationError],
    },
    /// Tasks declared in a task file
    Tasks(&'a Configs),
    /// Expanded steps of one task
    Plan(&'a TaskPlan),
}

pub fn format_output(report: &Report<'_>, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}
