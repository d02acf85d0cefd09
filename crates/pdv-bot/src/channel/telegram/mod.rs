//! Telegram Bot API channel
//!
//! Long-polls `getUpdates`, turns `/start` messages and button presses into
//! [`InboundEvent`](pdv_protocol::InboundEvent)s and renders replies with
//! `sendMessage`, `editMessageText` and `answerCallbackQuery`.

mod api;
mod client;
mod poller;
mod responder;

pub use api::{CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update, User};
pub use client::{truncate_text, BotApi, MAX_MESSAGE_LEN};
pub use poller::{route, TelegramChannel};
pub use responder::{ReplyTarget, TelegramResponder};
