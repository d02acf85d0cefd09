//! Authorization for incoming events
//!
//! Only operators whose chat user ID is listed in the configuration may
//! drive the bot. Everyone else gets a visible denial and nothing else.

mod gate;

pub use gate::AuthorizationGate;
