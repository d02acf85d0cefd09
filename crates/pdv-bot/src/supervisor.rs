//! Restart-on-failure supervision

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use pdv_core::config::SupervisorConfig;

/// Fixed-delay restart policy
#[derive(Debug, Clone)]
pub struct RestartPolicy {
    /// Delay before every restart
    delay: Duration,
    /// Restarts so far
    restarts: u64,
}

impl RestartPolicy {
    /// Create a policy from configuration
    pub fn from_config(config: &SupervisorConfig) -> Self {
        Self::new(config.restart_delay)
    }

    /// Create a policy with a custom delay
    pub fn new(delay: Duration) -> Self {
        Self { delay, restarts: 0 }
    }

    /// Record a restart and get the delay before it
    pub fn next_delay(&mut self) -> Duration {
        self.restarts += 1;
        self.delay
    }

    /// Number of restarts recorded
    pub fn restarts(&self) -> u64 {
        self.restarts
    }
}

/// Run `task` until it returns `Ok` or `cancel` fires, restarting it after
/// every error.
///
/// Returns the number of restarts.
pub async fn supervise<F, Fut, E>(
    mut policy: RestartPolicy,
    cancel: &CancellationToken,
    mut task: F,
) -> u64
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    loop {
        if cancel.is_cancelled() {
            break;
        }

        let error = match task().await {
            Ok(()) => break,
            Err(e) => e,
        };

        let delay = policy.next_delay();
        tracing::error!(
            "Service failed: {}. Restarting in {:?} (restart #{})",
            error,
            delay,
            policy.restarts()
        );

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    policy.restarts()
}
