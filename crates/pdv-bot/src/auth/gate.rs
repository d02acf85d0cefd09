//! Allow-list of operator identities

use std::collections::HashSet;

use pdv_protocol::ActorId;

/// Decides whether an actor may use the bot
#[derive(Debug, Clone, Default)]
pub struct AuthorizationGate {
    /// Permitted actors
    allowed: HashSet<ActorId>,
}

impl AuthorizationGate {
    /// Create a gate permitting exactly `actors`
    pub fn new(actors: impl IntoIterator<Item = ActorId>) -> Self {
        Self {
            allowed: actors.into_iter().collect(),
        }
    }

    /// Create a gate from raw configured user IDs
    pub fn from_user_ids(ids: &[i64]) -> Self {
        Self::new(ids.iter().copied().map(ActorId::new))
    }

    /// Check an actor against the allow-list
    pub fn is_authorized(&self, actor: ActorId) -> bool {
        self.allowed.contains(&actor)
    }

    /// Number of permitted actors
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    /// Check if nobody is permitted
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
