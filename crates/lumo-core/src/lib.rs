//! Core types, traits, and errors for the Lumo launcher.
//!
//! This crate provides the foundational types and abstractions used across
//! all other crates in the Lumo workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - The plugin domain model (`Plugin`, `Feature`, `Cmd`)
//! - Search results and the dispatchable action descriptor
//! - Revisioned-document types (`DocKey`, `Revision`, `StoredDocument`)
//! - Error hierarchy with contextual information
//! - Boundary traits for storage, discovery, merging, and dispatch

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod plugin;
mod result;
mod types;

pub mod traits;

pub use error::{Error, Result};
pub use plugin::{Cmd, Feature, Plugin, PluginKind};
pub use result::{LaunchAction, RESULT_VALUE, SearchResult};
pub use types::{DocKey, Revision, StoredDocument};
