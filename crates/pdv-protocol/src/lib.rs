//! pdv-protocol: Boundary types between the messaging channel and the core
//!
//! Everything a channel adapter needs to turn raw chat updates into typed
//! events, and everything the core hands back to be rendered as buttons.
//! Callback payloads are decoded exactly once, here, so the state machine
//! only ever sees [`CallbackAction`] values.

pub mod action;
pub mod actor;
pub mod error;
pub mod event;
pub mod keyboard;
pub mod token;

pub use action::MaintenanceAction;
pub use actor::ActorId;
pub use error::ProtocolError;
pub use event::{EventKind, InboundEvent};
pub use keyboard::{Button, Keyboard};
pub use token::{CallbackAction, MAX_TOKEN_LEN};
