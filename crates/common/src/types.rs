use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier naming one project's storage location.
///
/// Negative values cannot be represented, so every `ProjectId` maps to a valid
/// sharded path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl ProjectId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProjectId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from identifier parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("invalid project identifier {input:?}: expected a non-negative integer")]
    Invalid { input: String },
}

impl FromStr for ProjectId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // u64::from_str accepts a leading '+', which is not a plain decimal identifier.
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::Invalid { input: s.into() });
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| IdError::Invalid { input: s.into() })
    }
}
