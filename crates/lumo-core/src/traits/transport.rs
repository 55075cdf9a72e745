//! Host messaging transport trait.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Message sent to the hosting process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    /// Ask the host to open a UI plugin window.
    OpenPlugin {
        /// Entry file of the plugin to open.
        url: PathBuf,
        /// Serialized launch payload, passed through verbatim.
        opts: String,
    },
}

/// Fire-and-forget channel to the hosting process.
///
/// `send` enqueues the message and returns; no acknowledgment is awaited and
/// delivery failures past the enqueue are not observable here.
pub trait MessageTransport: Send + Sync {
    /// Enqueues `message` for delivery to the host.
    ///
    /// # Errors
    ///
    /// Returns an error only when the message cannot be enqueued at all.
    fn send(&self, message: HostMessage) -> Result<()>;
}
