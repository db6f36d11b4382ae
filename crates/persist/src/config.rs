use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::StoreError;

/// Environment variable overriding [`StoreConfig::project_root`].
pub const PROJECT_ROOT_ENV: &str = "PROJECTSTORE_PROJECT_ROOT";
/// Environment variable overriding [`StoreConfig::version_root`].
pub const VERSION_ROOT_ENV: &str = "PROJECTSTORE_VERSION_ROOT";

/// Locations of the two sharded trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root of the current-state tree (`<shard>/LATEST`).
    pub project_root: PathBuf,
    /// Root of the version-history tree (`<shard>/<timestamp>.gz`).
    pub version_root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("/nfsmount/projectstore"),
            version_root: PathBuf::from("/nfsmount/versionstore"),
        }
    }
}

impl StoreConfig {
    pub fn new(project_root: impl Into<PathBuf>, version_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            version_root: version_root.into(),
        }
    }

    /// Load a config from a JSON file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
                StoreError::Config {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        tracing::debug!(?config, path = %path.display(), "loaded store config");
        Ok(config)
    }

    /// Apply [`PROJECT_ROOT_ENV`] and [`VERSION_ROOT_ENV`] when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var_os(key).map(PathBuf::from))
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        if let Some(root) = lookup(PROJECT_ROOT_ENV) {
            self.project_root = root;
        }
        if let Some(root) = lookup(VERSION_ROOT_ENV) {
            self.version_root = root;
        }
        self
    }
}
