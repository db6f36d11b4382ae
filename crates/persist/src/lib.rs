//! Persistence: read-only loading of project snapshots and their history.
//!
//! Layout under the two configured roots:
//! ```text
//! <project_root>/<shard>/LATEST        - uncompressed JSON, current state
//! <version_root>/<shard>/<unix-ts>.gz  - gzip JSON, one file per revision
//! ```
//! `<shard>` is the five-level path from [`projectstore_common::shard_path`].
//!
//! # Invariants
//! - Nothing under either root is ever written.
//! - A snapshot whose top-level JSON value is not an object fails to load.
//! - A project's version list is read at most once per [`Project`] instance.

pub mod config;
pub mod snapshot;
pub mod store;

pub use config::StoreConfig;
pub use snapshot::{decode_latest, decode_version};
pub use store::{LATEST_FILE_NAME, Project, ProjectStore, ProjectVersion, StoreError, VERSION_SUFFIX};
