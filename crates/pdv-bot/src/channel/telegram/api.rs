//! Bot API wire types
//!
//! Only the fields this bot reads or writes are modeled.

use serde::{Deserialize, Serialize};

use pdv_protocol::Keyboard;

use crate::channel::ChannelError;

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the result or turn the failure into a [`ChannelError`]
    pub fn into_result(self) -> Result<T, ChannelError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(ChannelError::Api {
                code: self.error_code.unwrap_or_default(),
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }
}

/// One incoming update
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

/// A chat message
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

/// A button press
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

/// Inline keyboard attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl From<&Keyboard> for InlineKeyboardMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        Self {
            inline_keyboard: keyboard
                .rows()
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| InlineKeyboardButton {
                            text: button.label.clone(),
                            callback_data: button.action.encode(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}
