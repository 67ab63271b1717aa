//! Error types.
//!
//! [`GenerateError`] is the only runtime failure the card knows about: the
//! outbound text-generation request failing in any way. The panel catches
//! it at its boundary, logs it and keeps the current message.

use thiserror::Error;

/// Failure of a text-generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Transport failure, timeout, or an undecodable response envelope.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The generated text was not a JSON object with `title`, `content` and `author`.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The worker carrying the request went away before reporting back.
    #[error("request interrupted before it settled")]
    Interrupted,
}

/// Invalid configuration supplied through the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}
