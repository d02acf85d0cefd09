//! Shared fakes for state machine tests

#![allow(dead_code)]

pub mod mock_api;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use pdv_bot::auth::AuthorizationGate;
use pdv_bot::channel::{ChannelError, Responder};
use pdv_bot::reply::Reply;
use pdv_bot::session::SessionStore;
use pdv_bot::SelectionMachine;
use pdv_core::{ExecutionResult, Fleet, Host, RemoteExecutor};
use pdv_protocol::MaintenanceAction;

pub const OPERATOR: i64 = 1001;
pub const OTHER_OPERATOR: i64 = 1002;
pub const STRANGER: i64 = 9999;

/// Build a machine over the default fleet
pub fn machine<E: RemoteExecutor>(executor: E, authorized: &[i64]) -> SelectionMachine<E> {
    SelectionMachine::new(
        AuthorizationGate::from_user_ids(authorized),
        Arc::new(SessionStore::new()),
        Fleet::default(),
        executor,
        "suporte",
    )
}

/// Records every reply it is asked to render
#[derive(Default)]
pub struct RecordingResponder {
    replies: Mutex<Vec<Reply>>,
    /// Fail `Processing` renders, as if the chat edit was rejected
    fail_processing: bool,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_processing() -> Self {
        Self {
            fail_processing: true,
            ..Self::default()
        }
    }

    /// Take everything recorded so far
    pub fn take(&self) -> Vec<Reply> {
        std::mem::take(&mut *self.replies.lock().unwrap())
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn render(&self, reply: Reply) -> Result<(), ChannelError> {
        if self.fail_processing && matches!(reply, Reply::Processing { .. }) {
            return Err(ChannelError::Api {
                code: 400,
                description: "Bad Request: message to edit not found".to_string(),
            });
        }
        self.replies.lock().unwrap().push(reply);
        Ok(())
    }
}

/// Returns a fixed result and records every call
pub struct ScriptedExecutor {
    calls: Mutex<Vec<(Host, MaintenanceAction)>>,
    result: ExecutionResult,
    /// Yield this many times per call to shake up task interleavings
    yields: u32,
}

impl ScriptedExecutor {
    pub fn new(result: ExecutionResult) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result,
            yields: 0,
        }
    }

    pub fn succeeding(output: &str) -> Self {
        Self::new(ExecutionResult::success(output))
    }

    pub fn with_yields(mut self, yields: u32) -> Self {
        self.yields = yields;
        self
    }

    pub fn calls(&self) -> Vec<(Host, MaintenanceAction)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteExecutor for ScriptedExecutor {
    async fn execute(&self, host: &Host, action: MaintenanceAction) -> ExecutionResult {
        self.calls.lock().unwrap().push((*host, action));
        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }
        self.result.clone()
    }
}

/// Blocks every call until released
#[derive(Default)]
pub struct GatedExecutor {
    pub entered: Notify,
    pub release: Notify,
}

#[async_trait]
impl RemoteExecutor for GatedExecutor {
    async fn execute(&self, _host: &Host, _action: MaintenanceAction) -> ExecutionResult {
        self.entered.notify_one();
        self.release.notified().await;
        ExecutionResult::success("done")
    }
}

/// Short wait used to show that something is still blocked
pub const SETTLE: Duration = Duration::from_millis(100);
