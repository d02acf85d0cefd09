//! Actor identifier type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the person sending events (a chat user ID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub i64);

impl ActorId {
    /// Create a new actor ID
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor-{}", self.0)
    }
}

impl From<i64> for ActorId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
