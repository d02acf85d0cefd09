//! Callback token encoding/decoding
//!
//! Inline buttons carry a short opaque string back to the bot when pressed.
//! The formats are:
//!
//! - `host_<n>`: select host `n` (decimal, no padding)
//! - `run_app`: restart the application on the selected host
//! - `run_reboot`: reboot the selected host
//! - `back_to_list`: return to the host list
//!
//! Host indices are not range-checked here; a syntactically valid
//! `host_99` decodes fine and is rejected by the fleet when selected.

use std::fmt;

use crate::action::MaintenanceAction;
use crate::error::ProtocolError;

/// Maximum callback payload length accepted by the channel (Telegram: 64 bytes)
pub const MAX_TOKEN_LEN: usize = 64;

const HOST_PREFIX: &str = "host_";
const RUN_APP: &str = "run_app";
const RUN_REBOOT: &str = "run_reboot";
const BACK: &str = "back_to_list";

/// A decoded button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackAction {
    /// Operator picked a host from the list
    SelectHost(u8),
    /// Operator picked an action for the selected host
    SelectAction(MaintenanceAction),
    /// Operator asked to go back to the host list
    Back,
}

impl CallbackAction {
    /// Decode a raw callback payload
    pub fn decode(token: &str) -> Result<Self, ProtocolError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(ProtocolError::TokenTooLong {
                len: token.len(),
                max: MAX_TOKEN_LEN,
            });
        }

        match token {
            RUN_APP => Ok(CallbackAction::SelectAction(
                MaintenanceAction::RestartApplication,
            )),
            RUN_REBOOT => Ok(CallbackAction::SelectAction(
                MaintenanceAction::RebootMachine,
            )),
            BACK => Ok(CallbackAction::Back),
            _ => {
                let index = token
                    .strip_prefix(HOST_PREFIX)
                    .ok_or_else(|| ProtocolError::UnknownToken(token.to_string()))?;
                index
                    .parse::<u8>()
                    .map(CallbackAction::SelectHost)
                    .map_err(|_| ProtocolError::InvalidHostIndex(token.to_string()))
            }
        }
    }

    /// Encode into a callback payload
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::SelectHost(index) => format!("{}{}", HOST_PREFIX, index),
            CallbackAction::SelectAction(MaintenanceAction::RestartApplication) => {
                RUN_APP.to_string()
            }
            CallbackAction::SelectAction(MaintenanceAction::RebootMachine) => {
                RUN_REBOOT.to_string()
            }
            CallbackAction::Back => BACK.to_string(),
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
