//! Typed inbound events

use crate::actor::ActorId;
use crate::token::CallbackAction;

/// An event delivered by the channel, already decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Who sent it
    pub actor: ActorId,
    /// What they asked for
    pub kind: EventKind,
}

/// The kinds of events the core understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Operator asked for the main view (e.g. `/start`)
    Entry,
    /// Operator pressed a button
    Callback(CallbackAction),
    /// Operator pressed a button whose payload could not be decoded
    Unrecognized(String),
}

impl InboundEvent {
    /// Entry event
    pub fn entry(actor: ActorId) -> Self {
        Self {
            actor,
            kind: EventKind::Entry,
        }
    }

    /// Decoded callback event
    pub fn callback(actor: ActorId, action: CallbackAction) -> Self {
        Self {
            actor,
            kind: EventKind::Callback(action),
        }
    }

    /// Build a callback event from a raw payload, decoding it once
    pub fn from_token(actor: ActorId, token: &str) -> Self {
        let kind = match CallbackAction::decode(token) {
            Ok(action) => EventKind::Callback(action),
            Err(e) => {
                tracing::debug!("Undecodable callback from {}: {}", actor, e);
                EventKind::Unrecognized(token.to_string())
            }
        };
        Self { actor, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MaintenanceAction;

    #[test]
    fn test_from_token_decodes_known_payloads() {
        let event = InboundEvent::from_token(ActorId::new(1), "run_reboot");
        assert_eq!(
            event.kind,
            EventKind::Callback(CallbackAction::SelectAction(
                MaintenanceAction::RebootMachine
            ))
        );
    }

    #[test]
    fn test_from_token_keeps_unknown_payloads() {
        let event = InboundEvent::from_token(ActorId::new(1), "bogus");
        assert_eq!(event.kind, EventKind::Unrecognized("bogus".to_string()));
    }
}
