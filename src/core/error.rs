//! Failure taxonomy for remote fee and rate sources.

use thiserror::Error;

/// Errors raised by the HTTP providers.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request error: {0}")]
    Request(String),
    #[error("HTTP error: {0}")]
    Status(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Why fallback data was used for (part of) a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackReason {
    #[error("network failure: {0}")]
    Network(String),
    #[error("unexpected data: {0}")]
    DataShape(String),
}

impl FallbackReason {
    /// Classifies a provider error. Parse failures are data-shape problems,
    /// everything else is treated as a network failure.
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<FetchError>() {
            Some(FetchError::Parse(_)) => FallbackReason::DataShape(err.to_string()),
            _ => FallbackReason::Network(err.to_string()),
        }
    }
}
