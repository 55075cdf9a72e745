//! Search engine, dispatcher, and orchestration for the Lumo launcher.
//!
//! # Architecture
//!
//! - [`QueryEngine`]: turns a free-text value into a ranked, deduplicated
//!   list of [`SearchResult`](lumo_core::SearchResult)s over the current
//!   plugin sets.
//! - [`Dispatcher`]: routes an activated result to its execution path by
//!   plugin type.
//! - [`StateController`]: wires startup (load → merge → cache) and query
//!   handling into observable application state.
//! - [`FsDiscovery`]: filesystem-backed plugin discovery for manifest
//!   directories.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod discovery;
mod dispatch;
mod engine;
mod manifest;
mod merge;
mod state;

pub use discovery::{DiscoveryConfig, FsDiscovery};
pub use dispatch::{Dispatcher, LogTransport, ShellRunner};
pub use engine::{EngineState, QueryEngine};
pub use manifest::{assemble_plugin, dev_plugin_detail};
pub use merge::NameMerge;
pub use state::StateController;
