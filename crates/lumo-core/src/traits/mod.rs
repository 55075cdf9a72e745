//! Boundary traits consumed by the launcher core.
//!
//! These traits define the seams to external collaborators: the revisioned
//! document store, the plugin discovery subsystem, the merge policy, the
//! external command runner, and the host messaging transport.

mod discovery;
mod merge;
mod runner;
mod store;
mod transport;

pub use discovery::{DownloadRequest, PluginDiscovery, PluginSlot};
pub use merge::MergePlugins;
pub use runner::CommandRunner;
pub use store::DocumentStore;
pub use transport::{HostMessage, MessageTransport};
