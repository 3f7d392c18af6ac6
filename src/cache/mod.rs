//! Cache Module
//!
//! The simulated cache: slots with TTL countdowns and dirty bits, the
//! per-step hit/miss tally, and the client request generator.

mod request;
mod slot;
mod table;
mod tally;

// Re-export public types
pub use request::{PendingRequest, RequestGenerator, RequestKind};
pub use slot::Slot;
pub use table::{CacheSnapshot, CacheTable, MAX_FILL_ATTEMPTS};
pub use tally::Tally;
