//! Cache Table Module
//!
//! The fixed-size table of cached store rows with TTL countdowns and dirty bits.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::Slot;
use crate::error::{EnvError, Result};
use crate::space::UniqueMultiDiscrete;

/// Rejected draws allowed while filling a table before giving up.
pub const MAX_FILL_ATTEMPTS: usize = 1_000_000;

/// Expected fill cost above which a warning is logged.
const SLOW_FILL_ATTEMPTS: f64 = 10_000.0;

// == Cache Snapshot ==
/// Column-wise copy of the table, as handed to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheSnapshot {
    pub rows: Vec<usize>,
    pub ttl: Vec<u32>,
    /// 1 = stale copy, 0 = clean or empty
    pub dirty: Vec<u8>,
}

// == Cache Table ==
/// Simulated cache with `cache_size` slots over a store of `store_size` rows.
///
/// A store row is cached in at most one slot, and a slot whose TTL reaches
/// zero is emptied in the same pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheTable {
    slots: Vec<Slot>,
    store_size: usize,
    max_ttl: u32,
}

impl CacheTable {
    // == Constructor ==
    /// Creates a table with every slot empty.
    pub fn new(cache_size: usize, store_size: usize, max_ttl: u32) -> Self {
        Self {
            slots: vec![Slot::vacant(store_size); cache_size],
            store_size,
            max_ttl,
        }
    }

    /// Creates a full table: distinct random rows, TTLs uniform in `1..=max_ttl`,
    /// all slots clean.
    ///
    /// Rows are drawn by rejection, so a cache nearly as large as the store
    /// can need a huge number of draws. Gives up with `SamplingExhausted`
    /// after [`MAX_FILL_ATTEMPTS`].
    pub fn sample<R: Rng + ?Sized>(
        cache_size: usize,
        store_size: usize,
        max_ttl: u32,
        rng: &mut R,
    ) -> Result<Self> {
        Self::sample_within(cache_size, store_size, max_ttl, MAX_FILL_ATTEMPTS, rng)
    }

    pub(crate) fn sample_within<R: Rng + ?Sized>(
        cache_size: usize,
        store_size: usize,
        max_ttl: u32,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if cache_size > store_size {
            return Err(EnvError::Configuration(format!(
                "Cache size {cache_size} cannot be greater than store size {store_size}"
            )));
        }
        if max_ttl == 0 {
            return Err(EnvError::Configuration(
                "TTL must be greater than 0".to_string(),
            ));
        }
        let expected = expected_fill_attempts(cache_size, store_size);
        if expected > SLOW_FILL_ATTEMPTS {
            warn!(
                cache_size,
                store_size,
                expected_attempts = expected,
                max_attempts,
                "Cache size is close to store size, filling the table may be slow"
            );
        }
        let rows = UniqueMultiDiscrete::new(vec![store_size; cache_size])?
            .with_max_attempts(max_attempts)
            .sample(rng)?;
        let slots = rows
            .into_iter()
            .map(|row| Slot::occupied(row, rng.gen_range(1..=max_ttl)))
            .collect();

        Ok(Self {
            slots,
            store_size,
            max_ttl,
        })
    }

    /// Sentinel row id marking an empty slot.
    pub fn empty_row(&self) -> usize {
        self.store_size
    }

    pub fn max_ttl(&self) -> u32 {
        self.max_ttl
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Number of slots currently holding a row.
    pub fn occupied(&self) -> usize {
        let empty = self.empty_row();
        self.slots.iter().filter(|s| !s.is_empty(empty)).count()
    }

    // == Lookup ==
    /// Index of the slot caching `row`, if any.
    pub fn lookup(&self, row: usize) -> Option<usize> {
        if row == self.empty_row() {
            return None;
        }
        self.slots.iter().position(|s| s.row == row)
    }

    // == Admit ==
    /// Caches `row` in `index` with a fresh, clean copy, overwriting whatever
    /// the slot held. A copy of `row` in another slot is dropped.
    pub fn admit(&mut self, index: usize, row: usize, ttl: u32) -> Result<()> {
        if index >= self.len() {
            return Err(EnvError::InvalidAction(format!(
                "slot {index} is outside 0..{}",
                self.len()
            )));
        }
        if ttl == 0 || ttl > self.max_ttl {
            return Err(EnvError::InvalidAction(format!(
                "ttl {ttl} is outside 1..={}",
                self.max_ttl
            )));
        }
        if row >= self.store_size {
            return Err(EnvError::InvalidAction(format!(
                "row {row} is outside 0..{}",
                self.store_size
            )));
        }

        if let Some(previous) = self.lookup(row).filter(|&i| i != index) {
            debug!(row, from = previous, to = index, "moving cached row");
            self.slots[previous] = Slot::vacant(self.store_size);
        }
        self.slots[index] = Slot::occupied(row, ttl);
        Ok(())
    }

    // == Mark Dirty ==
    /// Flags the cached copy of `row` as stale. Returns false when uncached.
    pub fn mark_dirty(&mut self, row: usize) -> bool {
        match self.lookup(row) {
            Some(index) => {
                self.slots[index].dirty = true;
                true
            }
            None => false,
        }
    }

    // == Evict ==
    /// Empties one slot. Returns the row it held, if any.
    pub fn evict(&mut self, index: usize) -> Option<usize> {
        let empty = self.empty_row();
        let slot = self.slots.get_mut(index)?;
        if slot.is_empty(empty) {
            return None;
        }
        let row = slot.row;
        *slot = Slot::vacant(empty);
        Some(row)
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        let empty = self.empty_row();
        self.slots.fill(Slot::vacant(empty));
    }

    // == Decay And Evict ==
    /// Decrements the TTL of every occupied slot, emptying those that reach zero.
    ///
    /// Returns the number of evicted slots.
    pub fn decay_and_evict(&mut self) -> usize {
        let empty = self.empty_row();
        let mut evicted = 0;
        for index in 0..self.slots.len() {
            if self.slots[index].decay(empty) && self.evict(index).is_some() {
                evicted += 1;
            }
        }
        if evicted > 0 {
            debug!(evicted, "TTL expired");
        }
        evicted
    }

    // == Snapshot ==
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            rows: self.slots.iter().map(|s| s.row).collect(),
            ttl: self.slots.iter().map(|s| s.ttl).collect(),
            dirty: self.slots.iter().map(|s| u8::from(s.dirty)).collect(),
        }
    }
}

/// Mean number of uniform draws of `cache_size` rows out of `store_size`
/// until all of them are distinct.
fn expected_fill_attempts(cache_size: usize, store_size: usize) -> f64 {
    let n = store_size as f64;
    let log_p: f64 = (0..cache_size).map(|i| ((n - i as f64) / n).ln()).sum();
    (-log_p).exp()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn empty_table() -> CacheTable {
        CacheTable::new(4, 10, 5)
    }

    #[test]
    fn test_table_new() {
        let table = empty_table();
        assert_eq!(table.len(), 4);
        assert_eq!(table.occupied(), 0);
        assert_eq!(table.empty_row(), 10);
        assert!(table.slots().iter().all(|s| s.ttl == 0 && !s.dirty));
    }

    #[test]
    fn test_sample_fills_every_slot() {
        let mut rng = StdRng::seed_from_u64(42);
        let table = CacheTable::sample(4, 10, 5, &mut rng).unwrap();

        assert_eq!(table.occupied(), 4);
        let rows: HashSet<usize> = table.slots().iter().map(|s| s.row).collect();
        assert_eq!(rows.len(), 4);
        for slot in table.slots() {
            assert!(slot.row < 10);
            assert!((1..=5).contains(&slot.ttl));
            assert!(!slot.dirty);
        }
    }

    #[test]
    fn test_sample_cache_equal_to_store() {
        let mut rng = StdRng::seed_from_u64(1);
        let table = CacheTable::sample(6, 6, 2, &mut rng).unwrap();

        let mut rows: Vec<usize> = table.slots().iter().map(|s| s.row).collect();
        rows.sort_unstable();
        assert_eq!(rows, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sample_full_store_gives_up() {
        // 24 of 24 rows succeeds once in ~2e9 draws
        let mut rng = StdRng::seed_from_u64(7);
        let result = CacheTable::sample_within(24, 24, 3, 500, &mut rng);
        assert_eq!(result, Err(EnvError::SamplingExhausted { attempts: 500 }));
    }

    #[test]
    fn test_sample_default_ceiling_is_finite() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = CacheTable::sample(24, 24, 3, &mut rng);
        assert_eq!(
            result,
            Err(EnvError::SamplingExhausted {
                attempts: MAX_FILL_ATTEMPTS
            })
        );
    }

    #[test]
    fn test_expected_fill_attempts() {
        assert_eq!(expected_fill_attempts(0, 10), 1.0);
        assert!((expected_fill_attempts(1, 10) - 1.0).abs() < 1e-9);
        // 2 of 2: half the draws repeat
        assert!((expected_fill_attempts(2, 2) - 2.0).abs() < 1e-9);
        assert!(expected_fill_attempts(32, 128) < SLOW_FILL_ATTEMPTS);
        assert!(expected_fill_attempts(24, 24) > MAX_FILL_ATTEMPTS as f64);
    }

    #[test]
    fn test_sample_rejects_oversized_cache() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = CacheTable::sample(7, 6, 2, &mut rng);
        assert!(matches!(result, Err(EnvError::Configuration(_))));
    }

    #[test]
    fn test_admit_and_lookup() {
        let mut table = empty_table();

        table.admit(2, 7, 3).unwrap();

        assert_eq!(table.lookup(7), Some(2));
        assert_eq!(table.lookup(6), None);
        assert_eq!(table.slot(2), Some(&Slot::occupied(7, 3)));
    }

    #[test]
    fn test_lookup_empty_sentinel_is_never_found() {
        let table = empty_table();
        assert_eq!(table.lookup(table.empty_row()), None);
    }

    #[test]
    fn test_admit_overwrites_and_clears_dirty() {
        let mut table = empty_table();
        table.admit(0, 3, 2).unwrap();
        table.mark_dirty(3);

        table.admit(0, 3, 5).unwrap();

        assert_eq!(table.slot(0), Some(&Slot::occupied(3, 5)));
    }

    #[test]
    fn test_admit_moves_row_from_other_slot() {
        let mut table = empty_table();
        table.admit(0, 3, 2).unwrap();

        table.admit(1, 3, 4).unwrap();

        assert_eq!(table.lookup(3), Some(1));
        assert!(table.slot(0).unwrap().is_empty(table.empty_row()));
        assert_eq!(table.occupied(), 1);
    }

    #[test]
    fn test_admit_rejects_out_of_bounds() {
        let mut table = empty_table();

        assert!(matches!(table.admit(4, 1, 1), Err(EnvError::InvalidAction(_))));
        assert!(matches!(table.admit(0, 1, 0), Err(EnvError::InvalidAction(_))));
        assert!(matches!(table.admit(0, 1, 6), Err(EnvError::InvalidAction(_))));
        assert!(matches!(table.admit(0, 10, 1), Err(EnvError::InvalidAction(_))));
        assert_eq!(table, empty_table());
    }

    #[test]
    fn test_mark_dirty() {
        let mut table = empty_table();
        table.admit(1, 5, 3).unwrap();

        assert!(table.mark_dirty(5));
        assert!(!table.mark_dirty(6));
        assert!(table.slot(1).unwrap().dirty);
        assert_eq!(table.slot(1).unwrap().ttl, 3);
    }

    #[test]
    fn test_evict() {
        let mut table = empty_table();
        table.admit(1, 5, 3).unwrap();

        assert_eq!(table.evict(1), Some(5));
        assert_eq!(table.evict(1), None);
        assert_eq!(table.evict(9), None);
        assert_eq!(table.lookup(5), None);
    }

    #[test]
    fn test_decay_and_evict() {
        let mut table = empty_table();
        table.admit(0, 1, 1).unwrap();
        table.admit(1, 2, 3).unwrap();
        table.mark_dirty(1);

        let evicted = table.decay_and_evict();

        assert_eq!(evicted, 1);
        assert_eq!(table.slot(0), Some(&Slot::vacant(10)));
        assert_eq!(table.lookup(1), None);
        assert_eq!(table.slot(1).unwrap().ttl, 2);
        // Empty slots keep ttl 0
        assert_eq!(table.slot(3).unwrap().ttl, 0);
    }

    #[test]
    fn test_clear() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut table = CacheTable::sample(4, 10, 5, &mut rng).unwrap();

        table.clear();

        assert_eq!(table, empty_table());
    }

    #[test]
    fn test_snapshot() {
        let mut table = empty_table();
        table.admit(0, 3, 2).unwrap();
        table.mark_dirty(3);

        let snapshot = table.snapshot();

        assert_eq!(snapshot.rows, vec![3, 10, 10, 10]);
        assert_eq!(snapshot.ttl, vec![2, 0, 0, 0]);
        assert_eq!(snapshot.dirty, vec![1, 0, 0, 0]);
    }
}
