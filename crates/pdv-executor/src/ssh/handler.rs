//! russh client handler for fleet hosts

use async_trait::async_trait;
use russh::client;
use russh_keys::key::PublicKey;

/// SSH client handler
///
/// Fleet hosts have no pinned host keys, so every key is accepted and only
/// its fingerprint is logged.
pub(crate) struct ClientHandler {
    /// Host being contacted, for log lines
    target: String,
}

impl ClientHandler {
    pub(crate) fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

#[async_trait]
impl client::Handler for ClientHandler {
    type Error = anyhow::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        tracing::debug!(
            "Host key for {}: {}",
            self.target,
            server_public_key.fingerprint()
        );
        Ok(true)
    }
}
