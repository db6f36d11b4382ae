//! Shared types for the project store.
//!
//! # Invariants
//! - A [`ProjectId`] is always a non-negative integer.
//! - [`shard_path`] is pure: the same root and identifier always yield the same path.

pub mod shard;
pub mod types;

pub use shard::{SHARD_WIDTH, shard_path, shard_segments};
pub use types::{IdError, ProjectId};
