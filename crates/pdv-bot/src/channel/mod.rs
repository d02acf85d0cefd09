//! Messaging channel boundary
//!
//! The state machine talks to a [`Responder`] created by the channel for
//! each inbound update; the Telegram adapter lives in [`telegram`].

pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

use crate::reply::Reply;

/// Errors raised while talking to the messaging service
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Transport failure (URL stripped, it embeds the bot token)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The service answered but rejected the request
    #[error("Bot API error {code}: {description}")]
    Api { code: i64, description: String },

    /// The service answered with something unexpected
    #[error("Malformed Bot API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ChannelError {
    fn from(e: reqwest::Error) -> Self {
        ChannelError::Http(e.without_url())
    }
}

/// Renders replies back to whoever sent the current event
#[async_trait]
pub trait Responder: Send + Sync {
    /// Show `reply` to the actor
    async fn render(&self, reply: Reply) -> Result<(), ChannelError>;
}
