//! Agent actions.

use serde::{Deserialize, Serialize};

// == Action ==
/// What the agent does with the row requested on this step.
///
/// Serialized as `{"type": "decline"}` or `{"type": "admit", "slot": 0, "ttl": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Leave the cache as it is
    Decline,
    /// Cache the requested row in `slot` for `ttl` steps
    Admit { slot: usize, ttl: u32 },
}

impl Action {
    pub fn admit(slot: usize, ttl: u32) -> Self {
        Action::Admit { slot, ttl }
    }
}
