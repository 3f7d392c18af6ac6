//! Reward Policy Module
//!
//! Scores a request against the cache as it stood before the agent acted.

use serde::Serialize;

use crate::cache::{PendingRequest, RequestKind, Slot, Tally};

// == Outcome ==
/// How one request met the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Read served from a clean cached copy
    CleanHit,
    /// Read served stale data
    DirtyHit,
    /// Read had to go to the store
    Miss,
    /// Write; `cached` when a cached copy was marked dirty
    Write { cached: bool },
}

impl Outcome {
    // == Record ==
    /// Appends this outcome's entry to the tally.
    pub fn record(self, tally: &mut Tally) {
        match self {
            Outcome::CleanHit => tally.record_hit(),
            Outcome::Miss => tally.record_miss(),
            Outcome::DirtyHit | Outcome::Write { .. } => tally.carry_forward(),
        }
    }
}

// == Reward Policy ==
/// Reward paid per outcome. Serving stale data costs more than a miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardPolicy {
    pub clean_hit: f64,
    pub dirty_hit: f64,
    pub miss: f64,
}

impl RewardPolicy {
    /// Classifies `request` given the slot caching its row, if any.
    pub fn evaluate(&self, request: &PendingRequest, cached: Option<&Slot>) -> Outcome {
        match (request.kind, cached) {
            (RequestKind::Read, Some(slot)) if slot.dirty => Outcome::DirtyHit,
            (RequestKind::Read, Some(_)) => Outcome::CleanHit,
            (RequestKind::Read, None) => Outcome::Miss,
            (RequestKind::Write, cached) => Outcome::Write {
                cached: cached.is_some(),
            },
        }
    }

    pub fn reward(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::CleanHit => self.clean_hit,
            Outcome::DirtyHit => self.dirty_hit,
            Outcome::Miss => self.miss,
            Outcome::Write { .. } => 0.0,
        }
    }
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            clean_hit: 0.5,
            dirty_hit: -1.0,
            miss: -0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean() -> Slot {
        Slot::occupied(3, 2)
    }

    fn dirty() -> Slot {
        Slot {
            dirty: true,
            ..clean()
        }
    }

    #[test]
    fn test_read_outcomes() {
        let policy = RewardPolicy::default();
        let read = PendingRequest::read(3);

        assert_eq!(policy.evaluate(&read, Some(&clean())), Outcome::CleanHit);
        assert_eq!(policy.evaluate(&read, Some(&dirty())), Outcome::DirtyHit);
        assert_eq!(policy.evaluate(&read, None), Outcome::Miss);
    }

    #[test]
    fn test_write_outcomes() {
        let policy = RewardPolicy::default();
        let write = PendingRequest::write(3);

        assert_eq!(
            policy.evaluate(&write, Some(&dirty())),
            Outcome::Write { cached: true }
        );
        assert_eq!(policy.evaluate(&write, None), Outcome::Write { cached: false });
    }

    #[test]
    fn test_default_rewards() {
        let policy = RewardPolicy::default();

        assert_eq!(policy.reward(Outcome::CleanHit), 0.5);
        assert_eq!(policy.reward(Outcome::DirtyHit), -1.0);
        assert_eq!(policy.reward(Outcome::Miss), -0.5);
        assert_eq!(policy.reward(Outcome::Write { cached: true }), 0.0);
    }

    #[test]
    fn test_record_outcomes() {
        let mut tally = Tally::new();

        Outcome::CleanHit.record(&mut tally);
        Outcome::DirtyHit.record(&mut tally);
        Outcome::Miss.record(&mut tally);
        Outcome::Write { cached: false }.record(&mut tally);

        assert_eq!(tally.hits(), &[0, 1, 1, 1, 1]);
        assert_eq!(tally.misses(), &[0, 0, 0, 1, 1]);
    }
}
