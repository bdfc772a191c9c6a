//! Scheduling of relabel passes.
//!
//! Nothing here reads the clock. Callers pass `Instant`s in, which keeps the
//! debounce rules testable and lets a host drive passes from its own event
//! loop.

mod debounce;

pub use debounce::{Debouncer, PassToken, Trigger};
