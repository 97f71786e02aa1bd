use thiserror::Error;

use crate::similarity::ModelError;

/// Library-level error type.
///
/// Hard failures only: a missing resume section never produces an error, it degrades to an
/// empty or zero field on the record.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Similarity model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ResumeError {
    /// Stable machine-readable code, for callers that surface errors over their own transport.
    pub fn code(&self) -> &'static str {
        match self {
            ResumeError::MalformedInput(_) => "MALFORMED_INPUT",
            ResumeError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
            ResumeError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

pub type Result<T, E = ResumeError> = std::result::Result<T, E>;
