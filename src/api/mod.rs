//! API Module
//!
//! HTTP handlers and routing for serving the environment to remote agents.
//!
//! # Endpoints
//! - `POST /reset` - Start a new episode
//! - `POST /step` - Apply an action and advance one request
//! - `GET /history` - Hit/miss history of the episode
//! - `GET /spaces` - Observation and action bounds
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
