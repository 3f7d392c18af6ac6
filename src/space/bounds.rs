//! Action and observation spaces.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::env::{Action, Observation};
use crate::error::{EnvError, Result};

// == Action Space ==
/// Valid actions: decline, or admit into `0..cache_size` with TTL `1..=max_ttl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionSpace {
    pub cache_size: usize,
    pub max_ttl: u32,
}

impl ActionSpace {
    pub fn new(cache_size: usize, max_ttl: u32) -> Self {
        Self {
            cache_size,
            max_ttl,
        }
    }

    // == Check ==
    /// Rejects an `Admit` whose slot or TTL is out of bounds.
    pub fn check(&self, action: &Action) -> Result<()> {
        match *action {
            Action::Decline => Ok(()),
            Action::Admit { slot, .. } if slot >= self.cache_size => {
                Err(EnvError::InvalidAction(format!(
                    "slot {slot} is outside 0..{}",
                    self.cache_size
                )))
            }
            Action::Admit { ttl, .. } if ttl == 0 || ttl > self.max_ttl => {
                Err(EnvError::InvalidAction(format!(
                    "ttl {ttl} is outside 1..={}",
                    self.max_ttl
                )))
            }
            Action::Admit { .. } => Ok(()),
        }
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.check(action).is_ok()
    }

    // == Sample ==
    /// Decline or a uniform admit, each half the time.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        if rng.gen_bool(0.5) {
            Action::Decline
        } else {
            Action::Admit {
                slot: rng.gen_range(0..self.cache_size),
                ttl: rng.gen_range(1..=self.max_ttl),
            }
        }
    }
}

// == Observation Space ==
/// Shape and invariants every observation satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObservationSpace {
    pub cache_size: usize,
    pub store_size: usize,
    pub max_ttl: u32,
}

impl ObservationSpace {
    pub fn new(cache_size: usize, store_size: usize, max_ttl: u32) -> Self {
        Self {
            cache_size,
            store_size,
            max_ttl,
        }
    }

    /// Row id that marks an empty slot.
    pub fn empty_row(&self) -> usize {
        self.store_size
    }

    pub fn flat_len(&self) -> usize {
        Observation::flat_len(self.cache_size)
    }

    // == Contains ==
    /// True iff lengths and ranges match, non-empty rows are distinct, and a
    /// slot is empty exactly when its TTL is zero (empty slots are clean).
    pub fn contains(&self, observation: &Observation) -> bool {
        let cache = &observation.cache;
        if observation.previous_request.row >= self.store_size
            || cache.rows.len() != self.cache_size
            || cache.ttl.len() != self.cache_size
            || cache.dirty.len() != self.cache_size
        {
            return false;
        }

        let empty = self.empty_row();
        let mut seen = HashSet::with_capacity(self.cache_size);
        for ((&row, &ttl), &dirty) in cache.rows.iter().zip(&cache.ttl).zip(&cache.dirty) {
            if row > empty || ttl > self.max_ttl || dirty > 1 {
                return false;
            }
            if (row == empty) != (ttl == 0) {
                return false;
            }
            if row == empty {
                if dirty != 0 {
                    return false;
                }
            } else if !seen.insert(row) {
                return false;
            }
        }
        true
    }
}
