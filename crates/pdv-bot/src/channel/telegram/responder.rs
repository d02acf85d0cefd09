//! Renders [`Reply`] values as Bot API calls

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::client::BotApi;
use crate::channel::{ChannelError, Responder};
use crate::reply::{Reply, DENIED_ALERT};

/// Where a reply goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyTarget {
    /// A plain message in a chat
    Chat { chat_id: i64 },
    /// A button press on a bot message
    Callback {
        query_id: String,
        chat_id: i64,
        /// Message the button belongs to; absent when Telegram no longer has it
        message_id: Option<i64>,
    },
}

/// Responder for a single inbound update
pub struct TelegramResponder {
    api: Arc<BotApi>,
    target: ReplyTarget,
    /// A callback query must be answered exactly once
    answered: AtomicBool,
}

impl TelegramResponder {
    /// Create a responder for `target`
    pub fn new(api: Arc<BotApi>, target: ReplyTarget) -> Self {
        Self {
            api,
            target,
            answered: AtomicBool::new(false),
        }
    }

    /// Get the reply target
    pub fn target(&self) -> &ReplyTarget {
        &self.target
    }

    /// Answer the pending callback query, if there is one left to answer
    async fn acknowledge(&self, alert: Option<&str>) -> Result<(), ChannelError> {
        let ReplyTarget::Callback { query_id, .. } = &self.target else {
            return Ok(());
        };
        if self.answered.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.api
            .answer_callback_query(query_id, alert, alert.is_some())
            .await
    }
}

#[async_trait]
impl Responder for TelegramResponder {
    async fn render(&self, reply: Reply) -> Result<(), ChannelError> {
        if matches!(reply, Reply::Denied) {
            if let ReplyTarget::Callback { .. } = self.target {
                return self.acknowledge(Some(DENIED_ALERT)).await;
            }
        } else {
            // Stops the client-side spinner; not fatal if it fails
            if let Err(e) = self.acknowledge(None).await {
                tracing::debug!("Failed to answer callback query: {}", e);
            }
        }

        let text = reply.text();
        let keyboard = reply.keyboard();

        match (&self.target, &reply) {
            (ReplyTarget::Callback { chat_id, message_id: Some(message_id), .. }, current)
                if !matches!(current, Reply::Report { .. }) =>
            {
                self.api
                    .edit_message_text(*chat_id, *message_id, &text, keyboard)
                    .await
            }
            (ReplyTarget::Chat { chat_id }, _) | (ReplyTarget::Callback { chat_id, .. }, _) => {
                self.api
                    .send_message(*chat_id, &text, keyboard)
                    .await
                    .map(|_| ())
            }
        }
    }
}
