//! Tally Module
//!
//! Per-step history of cumulative cache hits and misses.

use serde::Serialize;

// == Tally ==
/// Append-only hit/miss history for one episode.
///
/// Index 0 holds the initial zeros; every step appends exactly one entry to
/// both sequences, so they always have equal length and never decrease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Cumulative clean hits after each step
    hits: Vec<u64>,
    /// Cumulative misses after each step
    misses: Vec<u64>,
}

impl Tally {
    // == Constructor ==
    /// Creates a tally holding only the initial `[0]` / `[0]` entries.
    pub fn new() -> Self {
        Self {
            hits: vec![0],
            misses: vec![0],
        }
    }

    /// Latest `(hits, misses)` pair.
    pub fn latest(&self) -> (u64, u64) {
        (
            self.hits.last().copied().unwrap_or(0),
            self.misses.last().copied().unwrap_or(0),
        )
    }

    // == Record Hit ==
    /// Appends an entry with hits incremented.
    pub fn record_hit(&mut self) {
        let (hits, misses) = self.latest();
        self.push(hits + 1, misses);
    }

    // == Record Miss ==
    /// Appends an entry with misses incremented.
    pub fn record_miss(&mut self) {
        let (hits, misses) = self.latest();
        self.push(hits, misses + 1);
    }

    // == Carry Forward ==
    /// Appends a copy of the latest entry (dirty hits and writes).
    pub fn carry_forward(&mut self) {
        let (hits, misses) = self.latest();
        self.push(hits, misses);
    }

    fn push(&mut self, hits: u64, misses: u64) {
        self.hits.push(hits);
        self.misses.push(misses);
    }

    pub fn hits(&self) -> &[u64] {
        &self.hits
    }

    pub fn misses(&self) -> &[u64] {
        &self.misses
    }

    /// Number of entries, i.e. steps taken plus one.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    // == Hit Rate ==
    /// Calculates the cumulative hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no read was scored yet.
    pub fn hit_rate(&self) -> f64 {
        let (hits, misses) = self.latest();
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl Default for Tally {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_new() {
        let tally = Tally::new();
        assert_eq!(tally.hits(), &[0]);
        assert_eq!(tally.misses(), &[0]);
        assert_eq!(tally.len(), 1);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let tally = Tally::new();
        assert_eq!(tally.hit_rate(), 0.0);
    }

    #[test]
    fn test_record_hit() {
        let mut tally = Tally::new();
        tally.record_hit();
        tally.record_hit();
        assert_eq!(tally.hits(), &[0, 1, 2]);
        assert_eq!(tally.misses(), &[0, 0, 0]);
        assert_eq!(tally.hit_rate(), 1.0);
    }

    #[test]
    fn test_record_miss() {
        let mut tally = Tally::new();
        tally.record_miss();
        assert_eq!(tally.hits(), &[0, 0]);
        assert_eq!(tally.misses(), &[0, 1]);
        assert_eq!(tally.hit_rate(), 0.0);
    }

    #[test]
    fn test_carry_forward_keeps_alignment() {
        let mut tally = Tally::new();
        tally.record_hit();
        tally.record_miss();
        tally.carry_forward();
        assert_eq!(tally.hits(), &[0, 1, 1, 1]);
        assert_eq!(tally.misses(), &[0, 0, 1, 1]);
        assert_eq!(tally.latest(), (1, 1));
        assert_eq!(tally.hit_rate(), 0.5);
    }
}
