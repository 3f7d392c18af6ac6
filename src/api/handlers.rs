//! API Handlers
//!
//! HTTP request handlers for each environment endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{body::Bytes, extract::State, Json};

use crate::config::Config;
use crate::env::CacheEnv;
use crate::error::Result;
use crate::models::{
    HealthResponse, HistoryResponse, ResetRequest, ResetResponse, SpacesResponse, StepRequest,
    StepResponse,
};

/// Application state shared across all handlers.
///
/// The environment is not synchronised itself; the lock serialises
/// `reset` and `step` calls coming from concurrent connections.
#[derive(Clone)]
pub struct AppState {
    /// The single environment served by this process
    pub env: Arc<RwLock<CacheEnv>>,
}

impl AppState {
    /// Creates a new AppState around the given environment.
    pub fn new(env: CacheEnv) -> Self {
        Self {
            env: Arc::new(RwLock::new(env)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured sizes cannot build an environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        let env = CacheEnv::new(config.clone())?;
        Ok(Self::new(env))
    }
}

/// Handler for POST /reset
///
/// Starts a new episode. The body is optional, but a non-empty body must
/// be a valid `ResetRequest`.
pub async fn reset_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResetResponse>> {
    let req = ResetRequest::from_body(&body)?;

    let mut env = state.env.write().await;
    let (observation, info) = env.reset(req.seed)?;

    Ok(Json(ResetResponse::new(observation, info)))
}

/// Handler for POST /step
///
/// Applies the agent's action and advances the simulation by one request.
pub async fn step_handler(
    State(state): State<AppState>,
    Json(req): Json<StepRequest>,
) -> Result<Json<StepResponse>> {
    let mut env = state.env.write().await;
    let result = env.step(req.action)?;

    Ok(Json(StepResponse::from(result)))
}

/// Handler for GET /history
///
/// Returns the episode's hit/miss history for plotting.
pub async fn history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    let env = state.env.read().await;
    Json(HistoryResponse::from_tally(env.tally()))
}

/// Handler for GET /spaces
///
/// Describes observation and action bounds.
pub async fn spaces_handler(State(state): State<AppState>) -> Json<SpacesResponse> {
    let env = state.env.read().await;
    Json(SpacesResponse::from(env.observation_space()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
