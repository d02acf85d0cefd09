//! Per-actor selection sessions

mod store;

pub use store::{ActorSession, OwnedSession, SessionSlot, SessionState, SessionStore};
