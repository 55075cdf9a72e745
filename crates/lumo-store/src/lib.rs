//! Revisioned persistence layer for the Lumo launcher.
//!
//! Two pieces live here:
//! - [`MemoryStore`]: an in-process [`DocumentStore`](lumo_core::traits::DocumentStore)
//!   with optimistic concurrency control, used by tests and as the CLI
//!   default backing.
//! - [`RevisionedCache`]: the revision-tracking wrapper that keeps the two
//!   launcher documents (`cachePlugins`, `totalPlugins`) consistent with
//!   whatever store backs them.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod cache;
mod memory;

pub use cache::RevisionedCache;
pub use memory::MemoryStore;
