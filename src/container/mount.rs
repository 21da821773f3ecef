//! Decoding mount strings into bind mounts
//!
//! A mount is written `<source>:<destination>:<mode>`. The mode is optional;
//! only `wr` and `w` make the mount writable.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{DunnerError, Result};
use crate::probe::expand_home;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MountKind {
    Bind,
}

/// A bind mount ready for container creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mount {
    pub kind: MountKind,
    /// Absolute host path
    pub source: PathBuf,
    /// Path inside the container
    pub target: String,
    pub read_only: bool,
}

/// Where the project directory is mounted inside every container
pub const PROJECT_MOUNT_TARGET: &str = "/dunner";

/// Writable bind of the current directory at [`PROJECT_MOUNT_TARGET`]
pub fn project_mount() -> Result<Mount> {
    Ok(Mount {
        kind: MountKind::Bind,
        source: std::env::current_dir()?,
        target: PROJECT_MOUNT_TARGET.to_string(),
        read_only: false,
    })
}

/// Receives decoded mounts for one step
pub trait MountConsumer {
    fn add_mounts(&mut self, mounts: Vec<Mount>);
}

impl MountConsumer for Vec<Mount> {
    fn add_mounts(&mut self, mounts: Vec<Mount>) {
        self.extend(mounts);
    }
}

/// Decode `mounts` in order and hand them to `consumer`.
///
/// Assumes the strings already passed validation; source existence is not
/// checked again. Nothing is handed over if any mount fails.
pub fn decode_mounts<C>(mounts: &[String], consumer: &mut C) -> Result<()>
where
    C: MountConsumer + ?Sized,
{
    let decoded = mounts
        .iter()
        .map(|m| decode_mount(m))
        .collect::<Result<Vec<_>>>()?;
    consumer.add_mounts(decoded);
    Ok(())
}

/// Decode a single mount string
pub fn decode_mount(raw: &str) -> Result<Mount> {
    let trimmed = raw.trim_matches('\'').trim_matches('"');
    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() < 2 {
        return Err(DunnerError::InvalidMount {
            mount: raw.to_string(),
            reason: "expected <source>:<destination>[:<mode>]".to_string(),
        });
    }

    // `rw` passes validation but is not treated as writable here
    let read_only = !(parts.len() == 3 && matches!(parts[2], "wr" | "w"));

    let source =
        expand_home(parts[0]).ok_or_else(|| DunnerError::HomeDirUnavailable(raw.to_string()))?;
    let source = std::path::absolute(&source)?;

    Ok(Mount {
        kind: MountKind::Bind,
        source,
        target: parts[1].to_string(),
        read_only,
    })
}
