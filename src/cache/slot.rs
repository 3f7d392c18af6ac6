//! Cache Slot Module
//!
//! Defines one fixed position of the simulated cache with its TTL countdown.

// == Slot ==
/// One position in the cache table.
///
/// A slot is empty when `row` equals the table's empty sentinel (the store
/// size). Empty slots always carry `ttl == 0` and `dirty == false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Cached store row, or the empty sentinel
    pub row: usize,
    /// Steps left before eviction
    pub ttl: u32,
    /// Store row was written since this copy was cached
    pub dirty: bool,
}

impl Slot {
    // == Constructors ==
    /// Creates a freshly fetched (clean) slot.
    pub fn occupied(row: usize, ttl: u32) -> Self {
        Self {
            row,
            ttl,
            dirty: false,
        }
    }

    /// Creates an empty slot for a table whose sentinel is `empty_row`.
    pub fn vacant(empty_row: usize) -> Self {
        Self {
            row: empty_row,
            ttl: 0,
            dirty: false,
        }
    }

    // == Is Empty ==
    pub fn is_empty(&self, empty_row: usize) -> bool {
        self.row == empty_row
    }

    // == Decay ==
    /// Counts one step off the TTL of an occupied slot.
    ///
    /// Returns `true` when the countdown hit zero and the slot is due for
    /// eviction. Empty slots are left alone.
    pub fn decay(&mut self, empty_row: usize) -> bool {
        if self.is_empty(empty_row) {
            return false;
        }
        self.ttl = self.ttl.saturating_sub(1);
        self.ttl == 0
    }
}
