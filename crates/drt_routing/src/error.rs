use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Routing provider unavailable: {0}")]
    ProviderUnavailable(#[from] UnavailableError),

    #[error("Malformed routing response: {0}")]
    MalformedResponse(#[from] MalformedError),

    #[error("Invalid route input: {0}")]
    InvalidInput(String),
}

impl RouteError {
    /// Errors the assembler may recover from by estimating the route locally.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RouteError::ProviderUnavailable(_) | RouteError::MalformedResponse(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum UnavailableError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("OSRM returned error code {code}: {message}")]
    Code { code: String, message: String },

    #[error("OSRM returned no routes")]
    NoRoutes,
}

#[derive(Debug, Error)]
pub enum MalformedError {
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Expected {expected} legs, got {actual}")]
    LegCountMismatch { expected: usize, actual: usize },

    #[error("Invalid leg {index}: {reason}")]
    InvalidLeg { index: usize, reason: String },
}
