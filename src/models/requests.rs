//! Request DTOs for the environment API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::env::Action;
use crate::error::{EnvError, Result};

/// Request body for the RESET operation (POST /reset)
///
/// # Fields
/// - `seed`: Optional seed for the episode RNG (keeps the current stream if absent)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ResetRequest {
    /// Parses a reset body. An empty body means "no seed"; anything else
    /// must be a well-formed request.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| EnvError::InvalidRequest(e.to_string()))
    }
}

/// Request body for the STEP operation (POST /step)
#[derive(Debug, Clone, Deserialize)]
pub struct StepRequest {
    /// The agent's decision for the next request
    pub action: Action,
}
