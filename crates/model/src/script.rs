//! Typed tree over a sprite's script forest.
//!
//! Scripts are stored as nested JSON arrays whose shape is not fixed: a script
//! is a list that may hold blocks, which may hold further lists. Each value is
//! tagged once as a [`ScriptNode`] so searches walk a typed tree instead of
//! re-inspecting raw JSON.

use serde_json::Value;

use crate::entity::Fields;

/// Marker identifying a custom block definition ("make a block").
pub const BLOCK_DEFINITION: &str = "procDef";

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptNode<'a> {
    /// A nested list of further nodes.
    Sequence(Vec<ScriptNode<'a>>),
    /// A mapping-like block.
    Record(&'a Fields),
    /// Any terminal value: strings, numbers, booleans, null.
    Atom(&'a Value),
}

impl<'a> ScriptNode<'a> {
    /// Tag `value` and everything beneath it.
    ///
    /// Nesting depth is bounded by the JSON parser's recursion limit.
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items.iter().map(Self::from_value).collect()),
            Value::Object(fields) => Self::Record(fields),
            other => Self::Atom(other),
        }
    }

    /// Whether this node itself carries `marker`.
    ///
    /// A record carries it as a key. A list carries it as a direct string
    /// element, which is how list-encoded blocks spell their opcode.
    pub fn carries(&self, marker: &str) -> bool {
        match self {
            Self::Record(fields) => fields.contains_key(marker),
            Self::Sequence(items) => items
                .iter()
                .any(|item| matches!(item, Self::Atom(Value::String(s)) if s == marker)),
            Self::Atom(_) => false,
        }
    }
}

/// All top-level scripts of one sprite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptForest<'a> {
    roots: Vec<ScriptNode<'a>>,
}

impl<'a> ScriptForest<'a> {
    pub fn new(scripts: &'a [Value]) -> Self {
        Self {
            roots: scripts.iter().map(ScriptNode::from_value).collect(),
        }
    }

    pub fn roots(&self) -> &[ScriptNode<'a>] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first search for any node carrying `marker`.
    ///
    /// Records are tested but not descended into. Atoms are skipped. Uses an
    /// explicit stack and stops at the first match.
    pub fn contains_marker(&self, marker: &str) -> bool {
        let mut stack: Vec<&ScriptNode<'a>> = self.roots.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.carries(marker) {
                return true;
            }
            if let ScriptNode::Sequence(items) = node {
                stack.extend(items.iter().rev());
            }
        }
        false
    }

    pub fn contains_block_definition(&self) -> bool {
        self.contains_marker(BLOCK_DEFINITION)
    }
}
