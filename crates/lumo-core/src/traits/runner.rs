//! External command runner trait.

use crate::Result;

/// Runs an external command to completion, blocking the calling thread.
///
/// Dispatching an `app` plugin executes its `action` synchronously, so a
/// long-running command blocks the single cooperative execution context for
/// its whole duration. Callers must treat slow commands as a responsiveness
/// risk; there is no timeout or abort path.
pub trait CommandRunner: Send + Sync {
    /// Runs `command` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Execution`](crate::Error::Execution) when the
    /// command cannot be spawned or exits unsuccessfully.
    fn run(&self, command: &str) -> Result<()>;
}
