//! Minimal Bot API client
//!
//! Every method is a JSON `POST` to `{api_url}/bot{token}/{method}`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use pdv_core::config::TelegramConfig;
use pdv_protocol::Keyboard;

use super::api::{ApiResponse, InlineKeyboardMarkup, Message, Update};
use crate::channel::ChannelError;

/// Longest text Telegram accepts in one message
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Appended when a message had to be cut
const TRUNCATION_MARKER: &str = "\n…(truncated)";

/// Extra time on top of the long-poll timeout before the HTTP request gives up
const HTTP_GRACE: Duration = Duration::from_secs(10);

/// Telegram answers an edit with identical content with this error
const NOT_MODIFIED: &str = "message is not modified";

/// Update kinds this bot handles
const ALLOWED_UPDATES: [&str; 2] = ["message", "callback_query"];

/// Bot API client bound to one token
pub struct BotApi {
    client: reqwest::Client,
    /// `{api_url}/bot{token}`
    base: String,
}

impl BotApi {
    /// Create a client for the configured bot
    pub fn new(config: &TelegramConfig) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(config.poll_timeout + HTTP_GRACE)
            .build()?;

        Ok(Self {
            client,
            base: format!(
                "{}/bot{}",
                config.api_url.trim_end_matches('/'),
                config.token
            ),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> Result<T, ChannelError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base, method))
            .json(body)
            .send()
            .await?;

        // Failures come back as a JSON envelope with a non-2xx status
        let bytes = response.bytes().await?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)?;
        envelope.into_result()
    }

    /// Long-poll for updates starting at `offset`
    pub async fn get_updates(&self, offset: i64, timeout: Duration) -> Result<Vec<Update>, ChannelError> {
        let body = json!({
            "offset": offset,
            "timeout": timeout.as_secs(),
            "allowed_updates": ALLOWED_UPDATES,
        });
        self.call("getUpdates", &body).await
    }

    /// Send a new message
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<Message, ChannelError> {
        self.call("sendMessage", &message_body(chat_id, None, text, keyboard))
            .await
    }

    /// Replace the text and buttons of an existing message
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), ChannelError> {
        let body = message_body(chat_id, Some(message_id), text, keyboard);
        match self.call::<Value>("editMessageText", &body).await {
            Ok(_) => Ok(()),
            Err(ChannelError::Api { description, .. }) if description.contains(NOT_MODIFIED) => {
                tracing::trace!("Message {} already up to date", message_id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Acknowledge a button press, optionally with a popup
    pub async fn answer_callback_query(
        &self,
        query_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), ChannelError> {
        let mut body = json!({ "callback_query_id": query_id });
        if let Some(text) = text {
            body["text"] = json!(text);
            body["show_alert"] = json!(show_alert);
        }
        self.call::<bool>("answerCallbackQuery", &body).await.map(|_| ())
    }
}

/// Body shared by `sendMessage` and `editMessageText`
fn message_body(
    chat_id: i64,
    message_id: Option<i64>,
    text: &str,
    keyboard: Option<&Keyboard>,
) -> Value {
    let mut body = json!({
        "chat_id": chat_id,
        "text": truncate_text(text, MAX_MESSAGE_LEN),
    });
    if let Some(message_id) = message_id {
        body["message_id"] = json!(message_id);
    }
    if let Some(keyboard) = keyboard {
        body["reply_markup"] = json!(InlineKeyboardMarkup::from(keyboard));
    }
    body
}

/// Cut `text` to at most `max` characters, marking the cut
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let keep = max.saturating_sub(TRUNCATION_MARKER.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}
