//! Response DTOs for the environment API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::Tally;
use crate::env::{Observation, ResetInfo, StepInfo, StepResult};
use crate::space::ObservationSpace;

/// Response body for the RESET operation (POST /reset)
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    /// Observation of the freshly filled cache
    pub observation: Observation,
    /// Always empty
    pub info: ResetInfo,
}

impl ResetResponse {
    /// Creates a new ResetResponse
    pub fn new(observation: Observation, info: ResetInfo) -> Self {
        Self { observation, info }
    }
}

/// Response body for the STEP operation (POST /step)
#[derive(Debug, Clone, Serialize)]
pub struct StepResponse {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    /// Full hit/miss history so far
    pub info: StepInfo,
}

impl From<StepResult> for StepResponse {
    fn from(result: StepResult) -> Self {
        Self {
            observation: result.observation,
            reward: result.reward,
            terminated: result.terminated,
            truncated: result.truncated,
            info: result.info,
        }
    }
}

/// Response body for the history endpoint (GET /history)
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    /// Cumulative hits per step
    pub hits: Vec<u64>,
    /// Cumulative misses per step
    pub misses: Vec<u64>,
    /// Hit rate (hits / (hits + misses)) at the latest step
    pub hit_rate: f64,
}

impl HistoryResponse {
    /// Creates a new HistoryResponse from the episode tally
    pub fn from_tally(tally: &Tally) -> Self {
        Self {
            hits: tally.hits().to_vec(),
            misses: tally.misses().to_vec(),
            hit_rate: tally.hit_rate(),
        }
    }
}

/// Response body for the spaces endpoint (GET /spaces)
#[derive(Debug, Clone, Serialize)]
pub struct SpacesResponse {
    pub cache_size: usize,
    pub store_size: usize,
    pub max_ttl: u32,
    /// Row id used for empty slots
    pub empty_row: usize,
    /// Length of a flattened observation
    pub flat_observation_len: usize,
}

impl From<&ObservationSpace> for SpacesResponse {
    fn from(space: &ObservationSpace) -> Self {
        Self {
            cache_size: space.cache_size,
            store_size: space.store_size,
            max_ttl: space.max_ttl,
            empty_row: space.empty_row(),
            flat_observation_len: space.flat_len(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_response_hit_rate() {
        let mut tally = Tally::new();
        tally.record_hit();
        tally.record_hit();
        tally.record_hit();
        tally.record_miss();

        let resp = HistoryResponse::from_tally(&tally);
        assert_eq!(resp.hits, vec![0, 1, 2, 3, 3]);
        assert!((resp.hit_rate - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_history_response_zero_requests() {
        let resp = HistoryResponse::from_tally(&Tally::new());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_spaces_response() {
        let resp = SpacesResponse::from(&ObservationSpace::new(4, 10, 5));
        assert_eq!(resp.empty_row, 10);
        assert_eq!(resp.flat_observation_len, 14);
    }

    #[test]
    fn test_reset_response_info_is_empty_object() {
        let observation = crate::cache::CacheTable::new(2, 4, 3).snapshot();
        let resp = ResetResponse::new(
            Observation {
                previous_request: crate::cache::PendingRequest::read(1),
                cache: observation,
            },
            ResetInfo::default(),
        );
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["info"], serde_json::json!({}));
        assert_eq!(json["observation"]["cache"]["rows"], serde_json::json!([4, 4]));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
