//! Error types for the cache environment
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Env Error Enum ==
/// Unified error type for the cache environment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    /// Constructor arguments violate a size or TTL constraint
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request body could not be parsed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Action shape or bounds are invalid for this environment
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A bounded sampler gave up before finding a duplicate-free draw
    #[error("Sampling exhausted after {attempts} attempts")]
    SamplingExhausted {
        /// Number of rejected draws
        attempts: usize,
    },
}

// == IntoResponse Implementation ==
impl IntoResponse for EnvError {
    fn into_response(self) -> Response {
        let status = match &self {
            EnvError::Configuration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EnvError::InvalidRequest(_) | EnvError::InvalidAction(_) => StatusCode::BAD_REQUEST,
            EnvError::SamplingExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache environment.
pub type Result<T> = std::result::Result<T, EnvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_action_is_bad_request() {
        let response = EnvError::InvalidAction("ttl 0".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_request_is_bad_request() {
        let response = EnvError::InvalidRequest("bad json".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_configuration_status() {
        let response = EnvError::Configuration("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_sampling_exhausted_message() {
        let err = EnvError::SamplingExhausted { attempts: 7 };
        assert_eq!(err.to_string(), "Sampling exhausted after 7 attempts");
    }
}
