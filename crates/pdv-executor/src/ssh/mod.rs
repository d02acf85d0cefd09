//! SSH client for fleet hosts

mod executor;
mod handler;

pub use executor::{ExecError, SshExecutor, MAX_OUTPUT_SIZE};
