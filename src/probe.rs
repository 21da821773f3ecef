//! Filesystem existence checks
//!
//! The loader and the `parsedir` rule only ever ask whether a path exists.
//! Keeping that behind a trait lets tests answer without touching disk.

use std::fs;
use std::path::{Path, PathBuf};

/// Answers existence questions about host paths
pub trait FsProbe {
    /// True if `path` exists and is a directory
    fn dir_exists(&self, path: &Path) -> bool;

    /// True if `path` exists and is a regular file
    fn file_exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl FsProbe for HostFs {
    fn dir_exists(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => meta.is_dir(),
            Err(_) => false,
        }
    }

    fn file_exists(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => meta.is_file(),
            Err(_) => false,
        }
    }
}

/// Resolve a leading `~` against the home directory.
///
/// Paths without `~` come back unchanged; `None` means the home directory
/// is unknown.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    if !path.starts_with('~') {
        return Some(PathBuf::from(path));
    }
    let home = dirs::home_dir()?;
    let rest = path.trim_matches('~').trim_start_matches('/');
    if rest.is_empty() {
        Some(home)
    } else {
        Some(home.join(rest))
    }
}
