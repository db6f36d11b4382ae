//! Domain model: lazy, schema-less views over decoded project snapshots.
//!
//! Every view borrows or owns one JSON object and derives its properties on
//! demand. Nothing is validated up front beyond what each accessor needs.
//!
//! # Invariants
//! - A missing field is never confused with a field stored as `null`.
//! - Optional collections (`variables`, `scripts`, `costumes`, `sounds`) read
//!   as empty when absent.
//! - A child is a [`Sprite`] iff its `info` object has a `spriteInfo` key.

pub mod entity;
pub mod objects;
pub mod project;
pub mod record;
pub mod script;
pub mod sprite;

pub use entity::{Entity, Fields, ModelError};
pub use objects::{BaseObj, Child, DataStructure, MediaAsset, ScratchObject};
pub use project::{ProjectRevision, ProjectView};
pub use record::Record;
pub use script::{BLOCK_DEFINITION, ScriptForest, ScriptNode};
pub use sprite::Sprite;
