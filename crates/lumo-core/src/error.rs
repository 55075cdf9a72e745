//! Error types for the Lumo launcher.
//!
//! This module provides the error hierarchy shared by every crate in the
//! workspace. Each failure mode carries enough context to be surfaced to the
//! caller unchanged; nothing in the core catches and retries.
//!
//! # Examples
//!
//! ```
//! use lumo_core::{DocKey, Error, Result};
//!
//! fn write_guard(held_matches: bool) -> Result<()> {
//!     if !held_matches {
//!         return Err(Error::Conflict {
//!             key: DocKey::TotalPlugins,
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = write_guard(false).unwrap_err();
//! assert!(err.is_conflict());
//! ```

use crate::DocKey;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for launcher operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Lumo launcher.
///
/// The four launcher failure modes (`Conflict`, `Discovery`, `Manifest`,
/// `Execution`) propagate to the immediate caller; none is retried inside
/// the core. The remaining variants wrap plumbing faults.
#[derive(Error, Debug)]
pub enum Error {
    /// Revision mismatch when writing a document.
    ///
    /// The caller presented a revision token that is not the store's current
    /// one for this document. The write is rejected rather than merged; the
    /// caller must re-read the document to obtain a fresh token.
    #[error("revision conflict on document '{key}'")]
    Conflict {
        /// Document the rejected write targeted
        key: DocKey,
    },

    /// A plugin source failed to enumerate.
    ///
    /// Startup does not partially degrade: a discovery failure aborts the
    /// whole startup sequence.
    #[error("plugin discovery failed: {message}")]
    Discovery {
        /// Description of the discovery failure
        message: String,
        /// Underlying error cause, when one exists
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A dev plugin manifest is missing or malformed.
    ///
    /// Fatal to the dev-launch call that needed the manifest; there is no
    /// fallback manifest.
    #[error("dev plugin manifest at {} is missing or malformed", .path.display())]
    Manifest {
        /// Location of the manifest that could not be used
        path: PathBuf,
        /// Underlying read or parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An external app command failed.
    ///
    /// Fatal to the dispatch call only; engine state is not touched.
    #[error("external command failed: {command}")]
    Execution {
        /// The command (or plugin name) that failed to execute
        command: String,
        /// Underlying spawn or exit failure, when one exists
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Document-store plumbing fault other than a revision conflict.
    #[error("document store error: {message}")]
    Store {
        /// Description of the store fault
        message: String,
    },

    /// Snapshot encode/decode failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` if this is a revision conflict.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumo_core::{DocKey, Error};
    ///
    /// let err = Error::Conflict {
    ///     key: DocKey::CachePlugins,
    /// };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Returns `true` if this is a discovery failure.
    #[must_use]
    pub const fn is_discovery(&self) -> bool {
        matches!(self, Self::Discovery { .. })
    }

    /// Returns `true` if this is a manifest failure.
    #[must_use]
    pub const fn is_manifest(&self) -> bool {
        matches!(self, Self::Manifest { .. })
    }

    /// Returns `true` if this is an execution failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumo_core::Error;
    ///
    /// let err = Error::Execution {
    ///     command: "open -a Calculator".to_string(),
    ///     source: None,
    /// };
    /// assert!(err.is_execution());
    /// ```
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution { .. })
    }
}
