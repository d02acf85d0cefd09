//! Protocol error types

use thiserror::Error;

/// Errors that can occur while decoding channel payloads
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Callback token does not match any known action
    #[error("Unknown callback token: {0:?}")]
    UnknownToken(String),

    /// Host selection token carries a non-numeric index
    #[error("Invalid host index in token: {0:?}")]
    InvalidHostIndex(String),

    /// Token exceeds the channel's payload limit
    #[error("Token too long: {len} bytes exceeds maximum of {max} bytes")]
    TokenTooLong { len: usize, max: usize },
}
