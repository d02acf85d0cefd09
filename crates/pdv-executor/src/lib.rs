//! pdv-executor: SSH execution of maintenance actions
//!
//! Connects to a fleet host with the password derived for today, runs the
//! action's command under a PTY and hands back whatever the host printed.
//! Every failure is folded into a renderable
//! [`ExecutionResult`](pdv_core::ExecutionResult).

pub mod ssh;

pub use ssh::{ExecError, SshExecutor};
