//! Space Module
//!
//! Describes the sets of values the environment produces and accepts:
//! the uniqueness-constrained sampler used to fill the cache, plus the
//! action and observation spaces an agent is checked against.

mod bounds;
mod unique;

pub use bounds::{ActionSpace, ObservationSpace};
pub use unique::UniqueMultiDiscrete;
