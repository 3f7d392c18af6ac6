//! Observation Module
//!
//! What the agent sees after each step.

use serde::Serialize;

use crate::cache::{CacheSnapshot, PendingRequest};

// == Observation ==
/// The request that was just served plus a copy of the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub previous_request: PendingRequest,
    pub cache: CacheSnapshot,
}

impl Observation {
    /// Length of `flatten()` for a cache with `cache_size` slots.
    pub fn flat_len(cache_size: usize) -> usize {
        2 + 3 * cache_size
    }

    // == Flatten ==
    /// Fixed-length feature vector `[kind, row, rows.., ttl.., dirty..]`.
    pub fn flatten(&self) -> Vec<u64> {
        let mut flat = Vec::with_capacity(Self::flat_len(self.cache.rows.len()));
        flat.push(u64::from(self.previous_request.kind.code()));
        flat.push(self.previous_request.row as u64);
        flat.extend(self.cache.rows.iter().map(|&r| r as u64));
        flat.extend(self.cache.ttl.iter().map(|&t| u64::from(t)));
        flat.extend(self.cache.dirty.iter().map(|&d| u64::from(d)));
        flat
    }
}
