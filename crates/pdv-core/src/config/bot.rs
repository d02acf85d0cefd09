//! Bot configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::serde_utils::duration_secs;
use super::{FleetConfig, SshConfig};
use crate::error::ConfigError;

/// Configuration for the maintenance bot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Messaging channel
    pub telegram: TelegramConfig,

    /// Who may operate the bot
    pub access: AccessConfig,

    /// SSH client settings
    pub ssh: SshConfig,

    /// Fleet addressing
    pub fleet: FleetConfig,

    /// Process supervision
    pub supervisor: SupervisorConfig,
}

impl BotConfig {
    /// Check that everything needed to start is present and well-formed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram.token.trim().is_empty() {
            return Err(ConfigError::MissingField("telegram.token".to_string()));
        }
        if self.access.authorized_users.is_empty() {
            return Err(ConfigError::MissingField(
                "access.authorized_users".to_string(),
            ));
        }
        if self.ssh.username.trim().is_empty() {
            return Err(ConfigError::MissingField("ssh.username".to_string()));
        }
        if self.ssh.connect_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "ssh.connect_timeout must be positive".to_string(),
            ));
        }
        self.fleet.fleet()?;
        Ok(())
    }
}

/// Telegram Bot API settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub token: String,

    /// API base URL
    pub api_url: String,

    /// Long-polling timeout for `getUpdates`
    #[serde(with = "duration_secs")]
    pub poll_timeout: Duration,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: "https://api.telegram.org".to_string(),
            poll_timeout: Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}

/// Authorized operators
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Chat user IDs allowed to use the bot
    pub authorized_users: Vec<i64>,
}

/// Restart policy for the whole service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Fixed delay before restarting after a fatal error
    #[serde(with = "duration_secs")]
    pub restart_delay: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            restart_delay: Duration::from_secs(5),
        }
    }
}
