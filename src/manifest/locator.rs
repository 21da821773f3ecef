//! Task file discovery

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DunnerError, Result};
use crate::probe::FsProbe;

/// Task file name searched for when none is given
pub const DEFAULT_TASK_FILE: &str = ".dunner.yaml";

/// Resolve the task file to read.
///
/// Any name other than [`DEFAULT_TASK_FILE`] is returned unchanged. The
/// default name is searched for from the current directory upwards.
pub fn locate_task_file(filename: &Path, fs: &dyn FsProbe) -> Result<PathBuf> {
    if filename != Path::new(DEFAULT_TASK_FILE) {
        return Ok(filename.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    search_upwards(&cwd, fs)
}

/// Walk from `start` towards the root looking for [`DEFAULT_TASK_FILE`]
pub fn search_upwards(start: &Path, fs: &dyn FsProbe) -> Result<PathBuf> {
    let mut dir = start.to_path_buf();

    loop {
        let candidate = dir.join(DEFAULT_TASK_FILE);
        debug!(path = %candidate.display(), "looking for task file");
        if fs.file_exists(&candidate) {
            return Ok(candidate);
        }

        match dir.parent() {
            // parent() of a root is None; equal parent means traversal stalled
            Some(parent) if parent != dir => dir = parent.to_path_buf(),
            _ => return Err(DunnerError::TaskFileNotFound(DEFAULT_TASK_FILE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::HostFs;
    use std::collections::HashSet;
    use std::fs::{self, File};
    use tempfile::TempDir;

    struct FakeFs(HashSet<PathBuf>);

    impl FsProbe for FakeFs {
        fn dir_exists(&self, _path: &Path) -> bool {
            false
        }

        fn file_exists(&self, path: &Path) -> bool {
            self.0.contains(path)
        }
    }

    #[test]
    fn test_custom_name_returned_unchanged() {
        let fs = FakeFs(HashSet::new());
        let path = locate_task_file(Path::new("ci/tasks.yaml"), &fs).unwrap();
        assert_eq!(path, PathBuf::from("ci/tasks.yaml"));
    }

    #[test]
    fn test_found_in_start_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join(DEFAULT_TASK_FILE);
        File::create(&file_path).unwrap();

        let found = search_upwards(temp_dir.path(), &HostFs).unwrap();
        assert_eq!(found, file_path);
    }

    #[test]
    fn test_found_in_ancestor() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join(DEFAULT_TASK_FILE);
        File::create(&file_path).unwrap();
        let nested = temp_dir.path().join("a").join("b").join("c");
        fs::create_dir_all(&nested).unwrap();

        let found = search_upwards(&nested, &HostFs).unwrap();
        assert_eq!(found, file_path);
    }

    #[test]
    fn test_nearest_file_wins() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("child");
        fs::create_dir_all(&nested).unwrap();
        File::create(temp_dir.path().join(DEFAULT_TASK_FILE)).unwrap();
        File::create(nested.join(DEFAULT_TASK_FILE)).unwrap();

        let found = search_upwards(&nested, &HostFs).unwrap();
        assert_eq!(found, nested.join(DEFAULT_TASK_FILE));
    }

    #[test]
    fn test_not_found_at_root() {
        let fs = FakeFs(HashSet::new());
        let result = search_upwards(Path::new("/definitely/not/here"), &fs);
        assert!(matches!(result, Err(DunnerError::TaskFileNotFound(_))));
    }
}
