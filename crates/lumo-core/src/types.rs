//! Strong domain types for the revisioned document layer.
//!
//! This module implements the newtype pattern for the persistence-side
//! primitives: the two well-known document keys, the opaque revision token,
//! and the stored document envelope.
//!
//! # Type Safety Benefits
//!
//! Using strong types instead of primitives prevents:
//! - Writing to a document key that does not exist
//! - Mixing up revision tokens with other string values
//! - Accidental type conversions
//!
//! # Examples
//!
//! ```
//! use lumo_core::{DocKey, Revision};
//!
//! let key = DocKey::TotalPlugins;
//! assert_eq!(key.as_str(), "totalPlugins");
//!
//! let rev = Revision::new("1-9f3a");
//! assert_eq!(rev.as_str(), "1-9f3a");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Key of one of the two live launcher documents.
///
/// The launcher persists exactly two logical documents: the last search
/// snapshot (`cachePlugins`) and the authoritative plugin list
/// (`totalPlugins`). Modeling the keys as an enum makes writes to any other
/// document unrepresentable.
///
/// # Examples
///
/// ```
/// use lumo_core::DocKey;
///
/// assert_eq!(DocKey::CachePlugins.as_str(), "cachePlugins");
/// assert_eq!(DocKey::TotalPlugins.to_string(), "totalPlugins");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocKey {
    /// Snapshot of the last produced search list, kept for session restore.
    #[serde(rename = "cachePlugins")]
    CachePlugins,
    /// The authoritative full plugin list.
    #[serde(rename = "totalPlugins")]
    TotalPlugins,
}

impl DocKey {
    /// Returns the wire name of the document.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CachePlugins => "cachePlugins",
            Self::TotalPlugins => "totalPlugins",
        }
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque revision token (newtype over String).
///
/// Returned by the document store on every successful write and required to
/// authorize the next write to the same document. The launcher never
/// inspects the token's contents.
///
/// # Examples
///
/// ```
/// use lumo_core::Revision;
///
/// let rev = Revision::new("2-cafe");
/// assert_eq!(rev.as_str(), "2-cafe");
/// let inner: String = rev.into_inner();
/// assert_eq!(inner, "2-cafe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Revision(String);

impl Revision {
    /// Creates a new revision token.
    #[inline]
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Revision` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Revision {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Revision {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A document as read back from the store: payload plus current revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Serialized plugin-list snapshot.
    pub data: Value,
    /// Revision the store currently holds for this document.
    pub revision: Revision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dockey_wire_names() {
        assert_eq!(DocKey::CachePlugins.as_str(), "cachePlugins");
        assert_eq!(DocKey::TotalPlugins.as_str(), "totalPlugins");
    }

    #[test]
    fn dockey_serde_round_trip() {
        let json = serde_json::to_string(&DocKey::CachePlugins).unwrap();
        assert_eq!(json, "\"cachePlugins\"");
        let back: DocKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DocKey::CachePlugins);
    }

    #[test]
    fn revision_creation() {
        let rev = Revision::new("1-abc");
        assert_eq!(rev.as_str(), "1-abc");
        assert_eq!(format!("{rev}"), "1-abc");
    }

    #[test]
    fn revision_from_impls() {
        let a = Revision::from("tok");
        let b = Revision::from("tok".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn stored_document_round_trip() {
        let doc = StoredDocument {
            data: serde_json::json!([{"name": "calc"}]),
            revision: Revision::new("1-x"),
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: StoredDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
