//! Session store implementation
//!
//! Sessions are kept in a `DashMap` of per-actor async mutexes. The map
//! guard is only held long enough to clone the actor's `Arc`, so a
//! transition can keep its own actor's mutex across the SSH call without
//! blocking anyone else. Two events from the same actor queue up on the
//! same mutex and run one after the other.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use pdv_core::Host;
use pdv_protocol::{ActorId, MaintenanceAction};

/// Where an actor is in the host → action flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Looking at the host list
    Idle,
    /// A host is chosen, waiting for an action
    HostSelected,
    /// An action is running on the chosen host
    Executing,
}

/// One actor's in-progress selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorSession {
    /// Host picked from the list
    pub selected_host: Option<Host>,
    /// Action currently running against `selected_host`
    pub pending_action: Option<MaintenanceAction>,
}

impl ActorSession {
    /// Derived state of this session
    pub fn state(&self) -> SessionState {
        match (self.selected_host, self.pending_action) {
            (None, _) => SessionState::Idle,
            (Some(_), None) => SessionState::HostSelected,
            (Some(_), Some(_)) => SessionState::Executing,
        }
    }

    /// Forget the host and any pending action
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Shared handle to one actor's session
pub type SessionSlot = Arc<Mutex<ActorSession>>;

/// Owns every actor's session
pub struct SessionStore {
    /// Sessions indexed by actor
    sessions: DashMap<ActorId, SessionSlot>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Get the actor's slot, creating an empty session on first use
    pub fn slot(&self, actor: ActorId) -> SessionSlot {
        let entry = self.sessions.entry(actor).or_default();
        Arc::clone(entry.value())
    }

    /// Lock the actor's session for the duration of a transition
    pub async fn lock(&self, actor: ActorId) -> OwnedSession {
        let slot = self.slot(actor);
        OwnedSession {
            guard: slot.lock_owned().await,
        }
    }

    /// Lock the actor's session only if it already exists
    pub async fn lock_existing(&self, actor: ActorId) -> Option<OwnedSession> {
        let slot = self.sessions.get(&actor).map(|r| Arc::clone(r.value()))?;
        Some(OwnedSession {
            guard: slot.lock_owned().await,
        })
    }

    /// Copy of the actor's session, if one was ever created
    pub async fn snapshot(&self, actor: ActorId) -> Option<ActorSession> {
        let slot = self.sessions.get(&actor).map(|r| Arc::clone(r.value()))?;
        let session = slot.lock().await;
        Some(session.clone())
    }

    /// Check whether the actor has a session
    pub fn contains(&self, actor: ActorId) -> bool {
        self.sessions.contains_key(&actor)
    }

    /// Number of sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// An actor's session, locked until dropped
pub struct OwnedSession {
    guard: OwnedMutexGuard<ActorSession>,
}

impl std::ops::Deref for OwnedSession {
    type Target = ActorSession;

    fn deref(&self) -> &ActorSession {
        &self.guard
    }
}

impl std::ops::DerefMut for OwnedSession {
    fn deref_mut(&mut self) -> &mut ActorSession {
        &mut self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdv_core::Fleet;

    #[test]
    fn test_session_state_transitions() {
        let host = Fleet::default().host(1).unwrap();
        let mut session = ActorSession::default();
        assert_eq!(session.state(), SessionState::Idle);

        session.selected_host = Some(host);
        assert_eq!(session.state(), SessionState::HostSelected);

        session.pending_action = Some(MaintenanceAction::RebootMachine);
        assert_eq!(session.state(), SessionState::Executing);

        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_sessions_are_created_lazily() {
        let store = SessionStore::new();
        let actor = ActorId::new(1);
        assert!(!store.contains(actor));
        assert!(store.snapshot(actor).await.is_none());

        assert!(store.lock_existing(actor).await.is_none());
        assert!(!store.contains(actor));

        drop(store.lock(actor).await);
        assert!(store.contains(actor));
        assert_eq!(store.snapshot(actor).await, Some(ActorSession::default()));
    }

    #[tokio::test]
    async fn test_lock_is_per_actor() {
        let store = SessionStore::new();
        let first = store.lock(ActorId::new(1)).await;

        // A different actor is not blocked by the first lock
        let second = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            store.lock(ActorId::new(2)),
        )
        .await;
        assert!(second.is_ok());

        // The same actor is
        let again = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            store.lock(ActorId::new(1)),
        )
        .await;
        assert!(again.is_err());
        drop(first);
    }
}
