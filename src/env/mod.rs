//! Environment Module
//!
//! The step/reset state machine an agent trains against: actions,
//! observations, the reward policy, and the engine tying them to the cache.

mod action;
mod engine;
mod observation;
mod reward;


pub use action::Action;
pub use engine::{CacheEnv, ResetInfo, StepInfo, StepResult};
pub use observation::Observation;
pub use reward::{Outcome, RewardPolicy};
