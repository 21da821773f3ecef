//! Validation rule registry
//!
//! Each step field maps to an ordered list of rules. A rule is a tag, a
//! message template and a predicate over one field value. Templates use
//! `{field}` for the field's YAML name and `{0}` for the offending value.

use serde::Serialize;

use super::model::{Configs, Step};
use crate::env::split_assignment;
use crate::probe::{expand_home, FsProbe};

/// Mode assumed when a mount has no third segment
pub const DEFAULT_MOUNT_MODE: &str = "r";

/// Mode tokens accepted by `mountdir`
pub const VALID_MOUNT_MODES: [&str; 4] = [DEFAULT_MOUNT_MODE, "wr", "rw", "w"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTag {
    Required,
    EnvFormat,
    #[serde(rename = "mountdir")]
    MountDir,
    #[serde(rename = "parsedir")]
    ParseDir,
    FollowExist,
    RequiredWithout,
}

impl RuleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleTag::Required => "required",
            RuleTag::EnvFormat => "env_format",
            RuleTag::MountDir => "mountdir",
            RuleTag::ParseDir => "parsedir",
            RuleTag::FollowExist => "follow_exist",
            RuleTag::RequiredWithout => "required_without",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            RuleTag::Required => "{field} is a required field",
            RuleTag::EnvFormat => "{field} entry '{0}' must have the form NAME=VALUE",
            RuleTag::MountDir => "mount directory '{0}' is invalid. Check format is '<valid_src_dir>:<valid_dest_dir>:<optional_mode>' and has right permission level",
            RuleTag::ParseDir => "mount directory '{0}' is invalid. Check if source directory path exists.",
            RuleTag::FollowExist => "follow task '{0}' does not exist",
            RuleTag::RequiredWithout => "image is required, unless the task has a `follow` field",
        }
    }

    /// Render the template for `field` and `value`
    pub fn render(&self, field: &str, value: &str) -> String {
        self.template()
            .replace("{field}", field)
            .replace("{0}", value)
    }
}

impl std::fmt::Display for RuleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a step rule may consult
pub struct RuleContext<'a> {
    pub configs: &'a Configs,
    pub step: &'a Step,
    pub fs: &'a dyn FsProbe,
}

pub type Predicate = fn(&RuleContext<'_>, &str) -> bool;

pub struct Rule {
    pub tag: RuleTag,
    pub check: Predicate,
}

/// Rules attached to one step field
pub struct FieldRules {
    /// Name used in the task file and in messages
    pub field: &'static str,
    /// Values of the field that rules run against
    pub values: fn(&Step) -> Vec<&str>,
    pub rules: &'static [Rule],
}

/// Step rules, evaluated in order. For each value only the first failing
/// rule is reported.
pub static STEP_RULES: &[FieldRules] = &[
    FieldRules {
        field: "image",
        values: image_values,
        rules: &[Rule {
            tag: RuleTag::RequiredWithout,
            check: image_or_follow,
        }],
    },
    FieldRules {
        field: "mounts",
        values: mount_values,
        rules: &[
            Rule {
                tag: RuleTag::MountDir,
                check: valid_mount_dir,
            },
            Rule {
                tag: RuleTag::ParseDir,
                check: mount_source_exists,
            },
        ],
    },
    FieldRules {
        field: "follow",
        values: follow_values,
        rules: &[Rule {
            tag: RuleTag::FollowExist,
            check: follow_task_exists,
        }],
    },
];

fn image_values(step: &Step) -> Vec<&str> {
    vec![step.image.as_deref().unwrap_or_default()]
}

fn mount_values(step: &Step) -> Vec<&str> {
    step.mounts.iter().map(String::as_str).collect()
}

fn follow_values(step: &Step) -> Vec<&str> {
    match step.follow.as_deref() {
        Some(follow) if !follow.is_empty() => vec![follow],
        _ => Vec::new(),
    }
}

fn image_or_follow(ctx: &RuleContext<'_>, image: &str) -> bool {
    !image.is_empty() || ctx.step.follow.as_deref().is_some_and(|f| !f.is_empty())
}

fn valid_mount_dir(_ctx: &RuleContext<'_>, mount: &str) -> bool {
    is_valid_mount_dir(mount)
}

fn mount_source_exists(ctx: &RuleContext<'_>, mount: &str) -> bool {
    is_existing_mount_source(mount, ctx.fs)
}

fn follow_task_exists(ctx: &RuleContext<'_>, follow: &str) -> bool {
    is_existing_task(ctx.configs, follow)
}

/// Non-empty colon separated segments, the way mounts are read by the rules
fn mount_segments(mount: &str) -> Vec<&str> {
    mount.split(':').filter(|s| !s.is_empty()).collect()
}

/// `source:target[:mode]` with a known mode
pub fn is_valid_mount_dir(mount: &str) -> bool {
    let mut segments = mount_segments(mount);
    if segments.len() == 2 {
        segments.push(DEFAULT_MOUNT_MODE);
    }
    if segments.len() != 3 {
        return false;
    }
    VALID_MOUNT_MODES.contains(&segments[2])
}

/// The source segment, with `~` expanded, names an existing directory.
///
/// Directives in the source were already resolved when the task file was
/// loaded, so the segment is checked as written.
pub fn is_existing_mount_source(mount: &str, fs: &dyn FsProbe) -> bool {
    let Some(source) = mount_segments(mount).first().copied() else {
        return false;
    };
    expand_home(source).is_some_and(|dir| fs.dir_exists(&dir))
}

/// `follow`, trimmed, names a task in `configs`
pub fn is_existing_task(configs: &Configs, follow: &str) -> bool {
    configs.has_task(follow.trim())
}

/// Exactly one `=` separator
pub fn is_valid_assignment(raw: &str) -> bool {
    split_assignment(raw).is_ok()
}
