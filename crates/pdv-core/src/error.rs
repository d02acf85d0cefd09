//! Core error types for pdv-ops

use std::path::PathBuf;
use thiserror::Error;

/// Operator selections that cannot be honored
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Host index outside the fleet
    #[error("Host index {index} is outside the fleet (1..={max})")]
    HostOutOfRange { index: u8, max: u8 },

    /// Action requested before any host was selected
    #[error("No host selected")]
    NoHostSelected,
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}
