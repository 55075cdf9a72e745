//! Result dispatch: route an activated search result by plugin type.

use crate::manifest::dev_plugin_detail;
use lumo_core::traits::{CommandRunner, HostMessage, MessageTransport};
use lumo_core::{Error, LaunchAction, PluginKind, Result};
use std::path::Path;
use std::process::Command;

/// Executes activated results according to their plugin type.
///
/// A pure type switch: `app` plugins run their action as a synchronous
/// external command, `ui` plugins are handed to the host process via a
/// fire-and-forget message, everything else is a no-op. Failures propagate
/// to the caller and never touch engine state.
#[derive(Debug)]
pub struct Dispatcher<R, T> {
    runner: R,
    transport: T,
}

impl<R: CommandRunner, T: MessageTransport> Dispatcher<R, T> {
    /// Creates a dispatcher over the given runner and transport.
    #[must_use]
    pub fn new(runner: R, transport: T) -> Self {
        Self { runner, transport }
    }

    /// Executes the plugin behind `action`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Execution`] when an `app` plugin has no action or
    /// its command fails, or when a `ui` plugin has no source file.
    pub fn open_plugin(&self, action: &LaunchAction) -> Result<()> {
        let plugin = action.plugin();
        match plugin.kind {
            PluginKind::App => {
                let command = plugin.action.as_deref().ok_or_else(|| Error::Execution {
                    command: plugin.name.clone(),
                    source: Some("app plugin has no action to execute".into()),
                })?;
                tracing::info!(plugin = %plugin.name, command, "executing app plugin");
                self.runner.run(command)
            }
            PluginKind::Ui => {
                let url = plugin.source_file.clone().ok_or_else(|| Error::Execution {
                    command: plugin.name.clone(),
                    source: Some("ui plugin has no source file".into()),
                })?;
                let opts = serde_json::to_string(action)?;
                tracing::info!(plugin = %plugin.name, "opening ui plugin");
                self.transport.send(HostMessage::OpenPlugin { url, opts })
            }
            PluginKind::Dev | PluginKind::System => {
                tracing::debug!(plugin = %plugin.name, kind = %plugin.kind, "no dispatch path");
                Ok(())
            }
        }
    }

    /// Assembles a dev plugin from its manifest and dispatches it as if it
    /// had been selected from search.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Manifest`] when the manifest cannot be read or
    /// parsed, or any [`open_plugin`](Self::open_plugin) failure.
    pub fn open_dev_plugin(
        &self,
        dev_plugin_path: &Path,
        kind: PluginKind,
        start_cmd: &str,
    ) -> Result<()> {
        let plugin = dev_plugin_detail(dev_plugin_path, kind, start_cmd)?;
        self.open_plugin(&LaunchAction::OpenPlugin {
            plugin,
            cmd: Some(start_cmd.to_string()),
            feature: None,
        })
    }
}

/// [`CommandRunner`] over the platform shell.
///
/// Blocks the calling thread until the command exits, matching the
/// synchronous dispatch contract for `app` plugins.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<()> {
        let status = if cfg!(windows) {
            Command::new("cmd").args(["/C", command]).status()
        } else {
            Command::new("sh").args(["-c", command]).status()
        };

        let status = status.map_err(|source| Error::Execution {
            command: command.to_string(),
            source: Some(Box::new(source)),
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Execution {
                command: command.to_string(),
                source: Some(format!("{status}").into()),
            })
        }
    }
}

/// [`MessageTransport`] that logs outgoing messages and drops them.
///
/// Stands in for a real host process where none is attached, e.g. in the
/// CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

impl MessageTransport for LogTransport {
    fn send(&self, message: HostMessage) -> Result<()> {
        match &message {
            HostMessage::OpenPlugin { url, .. } => {
                tracing::info!(url = %url.display(), "host message: open plugin");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::Plugin;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRunner {
        commands: Mutex<Vec<String>>,
        fail: bool,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, command: &str) -> Result<()> {
            self.commands.lock().unwrap().push(command.to_string());
            if self.fail {
                Err(Error::Execution {
                    command: command.to_string(),
                    source: Some("exit status: 1".into()),
                })
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        messages: Mutex<Vec<HostMessage>>,
    }

    impl MessageTransport for RecordingTransport {
        fn send(&self, message: HostMessage) -> Result<()> {
            self.messages.lock().unwrap().push(message);
            Ok(())
        }
    }

    fn open(plugin: Plugin) -> LaunchAction {
        LaunchAction::OpenPlugin {
            plugin,
            cmd: None,
            feature: None,
        }
    }

    #[test]
    fn app_plugin_runs_its_action() {
        let mut plugin = Plugin::new("Calc", PluginKind::App);
        plugin.action = Some("gnome-calculator".to_string());

        let dispatcher = Dispatcher::new(RecordingRunner::default(), RecordingTransport::default());
        dispatcher.open_plugin(&open(plugin)).unwrap();

        assert_eq!(
            *dispatcher.runner.commands.lock().unwrap(),
            vec!["gnome-calculator".to_string()]
        );
        assert!(dispatcher.transport.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn app_plugin_without_action_fails() {
        let dispatcher = Dispatcher::new(RecordingRunner::default(), RecordingTransport::default());
        let err = dispatcher
            .open_plugin(&open(Plugin::new("broken", PluginKind::App)))
            .unwrap_err();
        assert!(err.is_execution());
    }

    #[test]
    fn failed_command_surfaces_execution_error() {
        let mut plugin = Plugin::new("Calc", PluginKind::App);
        plugin.action = Some("false".to_string());

        let runner = RecordingRunner {
            fail: true,
            ..RecordingRunner::default()
        };
        let dispatcher = Dispatcher::new(runner, RecordingTransport::default());
        let err = dispatcher.open_plugin(&open(plugin)).unwrap_err();
        assert!(err.is_execution());
    }

    #[test]
    fn ui_plugin_sends_one_host_message() {
        let mut plugin = Plugin::new("img", PluginKind::Ui);
        plugin.source_file = Some("/plugins/img/index.html".into());

        let action = LaunchAction::OpenPlugin {
            plugin,
            cmd: Some("convert".to_string()),
            feature: None,
        };
        let dispatcher = Dispatcher::new(RecordingRunner::default(), RecordingTransport::default());
        dispatcher.open_plugin(&action).unwrap();

        let messages = dispatcher.transport.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        let HostMessage::OpenPlugin { url, opts } = &messages[0];
        assert_eq!(url, &std::path::PathBuf::from("/plugins/img/index.html"));
        // the payload travels serialized, verbatim
        let round_trip: LaunchAction = serde_json::from_str(opts).unwrap();
        assert_eq!(round_trip, action);
    }

    #[test]
    fn ui_plugin_without_source_file_fails() {
        let dispatcher = Dispatcher::new(RecordingRunner::default(), RecordingTransport::default());
        let err = dispatcher
            .open_plugin(&open(Plugin::new("img", PluginKind::Ui)))
            .unwrap_err();
        assert!(err.is_execution());
    }

    #[test]
    fn other_kinds_are_a_no_op() {
        let dispatcher = Dispatcher::new(RecordingRunner::default(), RecordingTransport::default());
        dispatcher
            .open_plugin(&open(Plugin::new("sys", PluginKind::System)))
            .unwrap();
        let mut dev = Plugin::new("draft", PluginKind::Dev);
        dev.status = true;
        dispatcher.open_plugin(&open(dev)).unwrap();

        assert!(dispatcher.runner.commands.lock().unwrap().is_empty());
        assert!(dispatcher.transport.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn shell_runner_reports_exit_failure() {
        let runner = ShellRunner;
        let err = runner.run("exit 3").unwrap_err();
        assert!(err.is_execution());
        runner.run("true").unwrap();
    }
}
