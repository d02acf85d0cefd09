//! Core trait definitions

mod executor;

pub use executor::RemoteExecutor;
