//! Cache RL - A variable-TTL cache simulation environment
//!
//! Simulates a bounded cache in front of a mock data store so an agent can
//! learn when to cache a fetched row and for how long.

pub mod api;
pub mod cache;
pub mod config;
pub mod env;
pub mod error;
pub mod models;
pub mod space;

pub use api::AppState;
pub use config::Config;
pub use env::{Action, CacheEnv, Observation, StepResult};
pub use error::EnvError;
