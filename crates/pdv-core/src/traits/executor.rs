//! Remote execution trait

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::{ExecutionResult, Host};
use pdv_protocol::MaintenanceAction;

/// Runs a maintenance action on a fleet host
///
/// Implementations never fail: transport problems come back as an
/// [`ExecutionResult`] with `succeeded == false`.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Run `action` on `host` and collect its output
    async fn execute(&self, host: &Host, action: MaintenanceAction) -> ExecutionResult;
}

#[async_trait]
impl<T: RemoteExecutor + ?Sized> RemoteExecutor for Arc<T> {
    async fn execute(&self, host: &Host, action: MaintenanceAction) -> ExecutionResult {
        (**self).execute(host, action).await
    }
}
