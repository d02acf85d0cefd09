//! SSH client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::serde_utils::duration_secs;

/// How the executor reaches fleet hosts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SshConfig {
    /// Username for password authentication
    pub username: String,

    /// SSH port on every host
    pub port: u16,

    /// Bound on TCP connect plus SSH handshake
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,

    /// Bound on authentication, command execution and output collection
    #[serde(with = "duration_secs")]
    pub command_timeout: Duration,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            username: "suporte".to_string(),
            port: 22,
            connect_timeout: Duration::from_secs(8),
            command_timeout: Duration::from_secs(120),
        }
    }
}
