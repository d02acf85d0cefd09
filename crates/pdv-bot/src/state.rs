//! Long-lived bot state

use std::sync::Arc;

use pdv_core::config::BotConfig;
use pdv_core::error::ConfigError;
use pdv_core::RemoteExecutor;
use pdv_executor::SshExecutor;

use crate::auth::AuthorizationGate;
use crate::machine::SelectionMachine;
use crate::session::SessionStore;

/// Everything that survives a channel restart
pub struct BotState<E = SshExecutor> {
    /// Configuration
    pub config: BotConfig,
    /// Per-actor sessions
    pub sessions: Arc<SessionStore>,
    /// Selection state machine
    pub machine: Arc<SelectionMachine<E>>,
}

impl BotState<SshExecutor> {
    /// Create state that executes over SSH
    pub fn new(config: BotConfig) -> Result<Self, ConfigError> {
        let executor = SshExecutor::new(config.ssh.clone());
        Self::with_executor(config, executor)
    }
}

impl<E: RemoteExecutor> BotState<E> {
    /// Create state with a custom executor
    pub fn with_executor(config: BotConfig, executor: E) -> Result<Self, ConfigError> {
        let fleet = config.fleet.fleet()?;
        let gate = AuthorizationGate::from_user_ids(&config.access.authorized_users);
        let sessions = Arc::new(SessionStore::new());
        let machine = Arc::new(SelectionMachine::new(
            gate,
            Arc::clone(&sessions),
            fleet,
            executor,
            config.ssh.username.clone(),
        ));

        Ok(Self {
            config,
            sessions,
            machine,
        })
    }

    /// Get the session store
    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Get the state machine
    pub fn machine(&self) -> &Arc<SelectionMachine<E>> {
        &self.machine
    }
}
