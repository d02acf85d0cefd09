//! Password-authenticated SSH execution
//!
//! One call opens one connection, runs one command and always disconnects,
//! whatever happened in between.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use russh::client::{self, Config, Handle};
use russh::{ChannelMsg, Disconnect};
use thiserror::Error;

use pdv_core::config::SshConfig;
use pdv_core::{derive, Clock, Credential, ExecutionResult, Host, LocalClock, RemoteExecutor};
use pdv_protocol::MaintenanceAction;

use super::handler::ClientHandler;

/// Output beyond this many bytes is dropped.
///
/// Results end up in a chat message, so anything this large is noise.
pub const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

/// Terminal type requested for the PTY
const PTY_TERM: &str = "xterm";
const PTY_COLS: u32 = 80;
const PTY_ROWS: u32 = 24;

/// Failures while talking to a host
#[derive(Debug, Error)]
pub enum ExecError {
    /// TCP connect or SSH handshake did not finish in time
    #[error("Connection to {addr} timed out after {timeout:?}")]
    ConnectTimeout { addr: SocketAddr, timeout: Duration },

    /// TCP connect or SSH handshake failed
    #[error("Failed to connect to {addr}: {reason}")]
    Connect { addr: SocketAddr, reason: String },

    /// Server refused the derived password
    #[error("Authentication failed for user '{user}'")]
    AuthRejected { user: String },

    /// Channel setup, exec or read failed
    #[error("Channel error: {0}")]
    Channel(#[from] russh::Error),

    /// Authentication, exec and output collection did not finish in time
    #[error("Command timed out after {0:?}")]
    CommandTimeout(Duration),
}

/// Runs maintenance actions over SSH with date-derived passwords
pub struct SshExecutor {
    /// SSH settings
    config: SshConfig,
    /// Source of "today" for credential derivation
    clock: Arc<dyn Clock>,
    /// Shared russh client configuration
    ssh_config: Arc<Config>,
}

impl SshExecutor {
    /// Create an executor using the local calendar date
    pub fn new(config: SshConfig) -> Self {
        Self::with_clock(config, Arc::new(LocalClock))
    }

    /// Create an executor with a custom date source
    pub fn with_clock(config: SshConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            ssh_config: Arc::new(Config::default()),
        }
    }

    /// Get the SSH configuration
    pub fn config(&self) -> &SshConfig {
        &self.config
    }

    /// Connect, run, collect, disconnect
    async fn run(&self, host: &Host, command: &str) -> Result<Vec<u8>, ExecError> {
        let credential = derive(host.index, self.clock.today());
        let addr = SocketAddr::from((host.address, self.config.port));

        let mut session = self.connect(addr).await?;

        let outcome = tokio::time::timeout(
            self.config.command_timeout,
            run_command(&mut session, &self.config.username, &credential, command),
        )
        .await
        .unwrap_or(Err(ExecError::CommandTimeout(self.config.command_timeout)));

        if let Err(e) = session
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
        {
            tracing::debug!("Disconnect from {} failed: {}", addr, e);
        }

        outcome
    }

    /// Open the TCP connection and complete the SSH handshake
    async fn connect(&self, addr: SocketAddr) -> Result<Handle<ClientHandler>, ExecError> {
        tracing::debug!("Connecting to {}", addr);
        let handler = ClientHandler::new(addr.to_string());

        tokio::time::timeout(
            self.config.connect_timeout,
            client::connect(Arc::clone(&self.ssh_config), addr, handler),
        )
        .await
        .map_err(|_| ExecError::ConnectTimeout {
            addr,
            timeout: self.config.connect_timeout,
        })?
        .map_err(|e| ExecError::Connect {
            addr,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RemoteExecutor for SshExecutor {
    async fn execute(&self, host: &Host, action: MaintenanceAction) -> ExecutionResult {
        tracing::info!("Running {} on {}", action, host);

        match self.run(host, action.command()).await {
            Ok(output) => {
                tracing::info!("{} on {} finished ({} bytes)", action, host, output.len());
                ExecutionResult::from_output(&output)
            }
            Err(e) => {
                tracing::warn!("{} on {} failed: {}", action, host, e);
                ExecutionResult::failure(e)
            }
        }
    }
}

/// Authenticate, then run `command` under a PTY and read until the channel closes
async fn run_command(
    session: &mut Handle<ClientHandler>,
    username: &str,
    credential: &Credential,
    command: &str,
) -> Result<Vec<u8>, ExecError> {
    tracing::debug!("Authenticating as user '{}'", username);
    let authenticated = session
        .authenticate_password(username, credential.expose())
        .await?;

    if !authenticated {
        return Err(ExecError::AuthRejected {
            user: username.to_string(),
        });
    }

    let mut channel = session.channel_open_session().await?;

    // sudo on the hosts insists on a terminal
    channel
        .request_pty(false, PTY_TERM, PTY_COLS, PTY_ROWS, 0, 0, &[])
        .await?;
    channel.exec(true, command).await?;

    let mut output = BytesMut::new();
    while let Some(msg) = channel.wait().await {
        match msg {
            ChannelMsg::Data { ref data } | ChannelMsg::ExtendedData { ref data, .. } => {
                append_capped(&mut output, data);
            }
            ChannelMsg::ExitStatus { exit_status } => {
                // keep reading, data may still arrive after the status
                if exit_status != 0 {
                    tracing::warn!("'{}' exited with status {}", command, exit_status);
                }
            }
            _ => {}
        }
    }

    Ok(output.to_vec())
}

fn append_capped(output: &mut BytesMut, data: &[u8]) {
    let room = MAX_OUTPUT_SIZE.saturating_sub(output.len());
    output.extend_from_slice(&data[..data.len().min(room)]);
}
