//! Core host-facing contracts.
//!
//! The engine never touches a document model directly. A host exposes its
//! content blocks through [`ContentHost`] and decides, through a
//! [`TrustPolicy`], what markup it is willing to insert.

mod host;
mod policy;

pub use host::{BlockId, ContentHost, MemoryHost};
pub use policy::{PassThroughPolicy, TrustPolicy, TrustedMarkup};
