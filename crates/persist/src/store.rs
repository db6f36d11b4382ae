//! Read-only project store over two sharded trees.
//!
//! ```text
//! <project_root>/12/34/56/78/9/LATEST
//! <version_root>/12/34/56/78/9/
//!   1325376000.gz
//!   1325462400.gz
//! ```

use projectstore_common::{ProjectId, shard_path};
use projectstore_model::{
    Entity, Fields, ModelError, ProjectRevision, ProjectView, ScratchObject,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::StoreConfig;
use crate::snapshot::{decode_latest, decode_version};

/// File holding the current state inside a project's shard directory.
pub const LATEST_FILE_NAME: &str = "LATEST";
/// Suffix of every historical snapshot file.
pub const VERSION_SUFFIX: &str = ".gz";

/// Errors from loading snapshots.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt compressed snapshot{}: {source}", location(.path))]
    Decompress {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error{}: {source}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "malformed snapshot{}: expected a JSON object at the top level, found {}",
        location(.path),
        json_kind(.value)
    )]
    MalformedSnapshot { path: Option<PathBuf>, value: Value },
    #[error("version file {filename:?} is not named <timestamp>.gz")]
    InvalidVersionName { filename: String },
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl StoreError {
    /// Snapshot file a decoding error came from, once the store knows it.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::Config { path, .. } => Some(path.as_path()),
            Self::Decompress { path, .. }
            | Self::Parse { path, .. }
            | Self::MalformedSnapshot { path, .. } => path.as_deref(),
            Self::InvalidVersionName { .. } | Self::Model(_) => None,
        }
    }

    /// Attach `file` to a decoding error that has no path yet.
    fn in_file(mut self, file: &Path) -> Self {
        if let Self::Decompress { path, .. }
        | Self::Parse { path, .. }
        | Self::MalformedSnapshot { path, .. } = &mut self
        {
            path.get_or_insert_with(|| file.to_path_buf());
        }
        self
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" in {}", path.display()))
        .unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One historical snapshot and the timestamp its file is named after.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectVersion {
    pub timestamp: i64,
    pub revision: ProjectRevision,
}

/// Entry point: resolves identifiers against the configured roots.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    config: StoreConfig,
}

impl ProjectStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn latest_path(&self, id: ProjectId) -> PathBuf {
        shard_path(&self.config.project_root, id).join(LATEST_FILE_NAME)
    }

    pub fn version_dir(&self, id: ProjectId) -> PathBuf {
        shard_path(&self.config.version_root, id)
    }

    /// Load the current state of `id` from its `LATEST` file.
    pub fn load(&self, id: ProjectId) -> Result<Project, StoreError> {
        let path = self.latest_path(id);
        let bytes = read_file(&path)?;
        tracing::debug!(%id, path = %path.display(), bytes = bytes.len(), "loading latest snapshot");
        let fields = decode_latest(&bytes).map_err(|err| err.in_file(&path))?;
        Ok(Project::new(id, fields, self.version_dir(id)))
    }

    /// Read every historical snapshot of `id`, bypassing any cache.
    pub fn load_versions(&self, id: ProjectId) -> Result<Vec<ProjectVersion>, StoreError> {
        read_versions(&self.version_dir(id))
    }
}

/// The latest state of one project plus lazily loaded history.
#[derive(Debug)]
pub struct Project {
    id: ProjectId,
    fields: Fields,
    version_dir: PathBuf,
    versions: Mutex<Option<Arc<[ProjectVersion]>>>,
}

impl Project {
    fn new(id: ProjectId, fields: Fields, version_dir: PathBuf) -> Self {
        Self {
            id,
            fields,
            version_dir,
            versions: Mutex::new(None),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn version_dir(&self) -> &Path {
        &self.version_dir
    }

    /// All historical snapshots, ordered by file name.
    ///
    /// Read once per instance; later calls return the same `Arc` without
    /// touching storage. Failures are not cached.
    pub fn versions(&self) -> Result<Arc<[ProjectVersion]>, StoreError> {
        let mut cache = self.versions.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(versions) = cache.as_ref() {
            tracing::trace!(id = %self.id, count = versions.len(), "version cache hit");
            return Ok(Arc::clone(versions));
        }
        let versions: Arc<[ProjectVersion]> = read_versions(&self.version_dir)?.into();
        *cache = Some(Arc::clone(&versions));
        Ok(versions)
    }
}

impl Entity for Project {
    const KIND: &'static str = "Project";

    fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl ScratchObject for Project {}

impl ProjectView for Project {}

fn read_file(path: &Path) -> Result<Vec<u8>, StoreError> {
    std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_versions(dir: &Path) -> Result<Vec<ProjectVersion>, StoreError> {
    let _span = tracing::info_span!("read_versions", dir = %dir.display()).entered();
    let io_error = |source: std::io::Error| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let name = entry.map_err(io_error)?.file_name();
        let name = name
            .into_string()
            .map_err(|raw| StoreError::InvalidVersionName {
                filename: raw.to_string_lossy().into_owned(),
            })?;
        names.push(name);
    }
    // Plain string order, so "100.gz" sorts before "20.gz".
    names.sort();

    let versions = names
        .iter()
        .map(|name| {
            let timestamp = parse_timestamp(name)?;
            let path = dir.join(name);
            let bytes = read_file(&path)?;
            tracing::debug!(timestamp, path = %path.display(), "decoding version");
            let fields = decode_version(&bytes).map_err(|err| err.in_file(&path))?;
            Ok(ProjectVersion {
                timestamp,
                revision: ProjectRevision::new(fields),
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    tracing::info!(count = versions.len(), "loaded project versions");
    Ok(versions)
}

fn parse_timestamp(filename: &str) -> Result<i64, StoreError> {
    filename
        .strip_suffix(VERSION_SUFFIX)
        .and_then(|stem| stem.parse().ok())
        .ok_or_else(|| StoreError::InvalidVersionName {
            filename: filename.into(),
        })
}
