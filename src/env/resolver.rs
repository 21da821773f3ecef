//! Variable lookups over a dotenv file and the host environment

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{DunnerError, Result};

/// Default dotenv file consulted before host variables
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Resolves variable names against two sources.
///
/// Values from the dotenv file shadow host variables of the same name. Both
/// sources are captured once at construction and never change afterwards.
#[derive(Debug, Clone)]
pub struct EnvResolver {
    env_file: PathBuf,
    dotenv: HashMap<String, String>,
    host: HashMap<String, String>,
}

impl EnvResolver {
    /// Read `env_file` and snapshot the process environment.
    ///
    /// A missing or unreadable dotenv file is not an error: lookups fall
    /// back to host variables only.
    pub fn load(env_file: impl AsRef<Path>) -> Self {
        let env_file = env_file.as_ref().to_path_buf();
        let dotenv = read_dotenv(&env_file);
        let host = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        Self { env_file, dotenv, host }
    }

    /// Build a resolver from explicit sources
    pub fn from_sources(
        env_file: impl Into<PathBuf>,
        dotenv: HashMap<String, String>,
        host: HashMap<String, String>,
    ) -> Self {
        Self {
            env_file: env_file.into(),
            dotenv,
            host,
        }
    }

    /// Look up `name`, dotenv first, then host
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.dotenv
            .get(name)
            .or_else(|| self.host.get(name))
            .map(String::as_str)
    }

    /// Like [`lookup`](Self::lookup) but fails with the missing name
    pub fn require(&self, name: &str) -> Result<&str> {
        self.lookup(name).ok_or_else(|| DunnerError::EnvNotFound {
            name: name.to_string(),
            env_file: self.env_file.display().to_string(),
        })
    }
}

fn read_dotenv(path: &Path) -> HashMap<String, String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(_) => {
            info!("No environment loaded from {} file: Not found", path.display());
            return HashMap::new();
        }
    };

    match iter.collect::<std::result::Result<HashMap<_, _>, _>>() {
        Ok(vars) => {
            debug!(count = vars.len(), file = %path.display(), "loaded dotenv file");
            vars
        }
        Err(e) => {
            info!("No environment loaded from {} file: {}", path.display(), e);
            HashMap::new()
        }
    }
}
