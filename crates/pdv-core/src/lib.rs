//! pdv-core: Core abstractions and configuration for pdv-ops
//!
//! This crate provides the fleet model, the date-based credential scheme,
//! the executor trait and the configuration structures shared by the
//! executor and the bot.

pub mod clock;
pub mod config;
pub mod credential;
pub mod error;
pub mod traits;
pub mod types;

pub use clock::{Clock, FixedClock, LocalClock};
pub use credential::{derive, Credential};
pub use error::{ConfigError, SelectionError};
pub use traits::RemoteExecutor;
pub use types::{ExecutionResult, Fleet, Host, HostIndex};

pub use pdv_protocol::MaintenanceAction;
