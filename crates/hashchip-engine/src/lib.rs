//! Hashchip engine crate.
//!
//! Connects the label rewriter to a live document: page matching, block
//! enumeration through a host trait, the trusted-markup gate, and the
//! debounced scheduling of relabel passes.

pub mod core;
pub mod logging;
pub mod page;
pub mod time;
pub mod watcher;

pub use crate::core::{BlockId, ContentHost, MemoryHost, PassThroughPolicy, TrustPolicy, TrustedMarkup};
pub use page::{PageMatcher, PagePattern};
pub use watcher::{LabelWatcher, PassReport, WatcherConfig};
