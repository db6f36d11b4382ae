use std::path::{Path, PathBuf};

use crate::types::ProjectId;

/// Minimum number of digits an identifier is zero-padded to.
pub const SHARD_WIDTH: usize = 9;

/// Split an identifier into its five directory segments.
///
/// The identifier is zero-padded to [`SHARD_WIDTH`] digits and cut into
/// segments of 2, 2, 2, 2 and the remaining digits. Identifiers wider than
/// nine digits keep every digit; the overflow lands in the last segment.
pub fn shard_segments(id: ProjectId) -> [String; 5] {
    let padded = format!("{:0width$}", id.get(), width = SHARD_WIDTH);
    [
        padded[0..2].to_string(),
        padded[2..4].to_string(),
        padded[4..6].to_string(),
        padded[6..8].to_string(),
        padded[8..].to_string(),
    ]
}

/// Resolve the sharded directory for `id` under `root`.
///
/// Each of the first four levels fans out to at most 100 entries, which keeps
/// directory listings bounded regardless of how many projects are stored.
pub fn shard_path(root: impl AsRef<Path>, id: ProjectId) -> PathBuf {
    let mut path = root.as_ref().to_path_buf();
    path.extend(shard_segments(id));
    path
}
