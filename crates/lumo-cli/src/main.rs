//! Lumo launcher CLI.
//!
//! Command-line front end over the query engine: discover plugins from the
//! configured roots, answer queries, and dispatch dev plugins.
//!
//! # Examples
//!
//! ```bash
//! # query the discovered plugins
//! lumo search conv
//!
//! # show everything that is installed
//! lumo list
//!
//! # assemble and dispatch a dev plugin
//! lumo dev ~/src/my-plugin start
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use lumo_core::PluginKind;
use lumo_engine::{
    Dispatcher, FsDiscovery, LogTransport, NameMerge, ShellRunner, StateController,
};
use lumo_store::MemoryStore;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;

use config::CliConfig;

/// Lumo - plugin quick launcher.
#[derive(Parser, Debug)]
#[command(name = "lumo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a query against the discovered plugins and print the results.
    Search {
        /// Query value; empty prints the full plugin list
        #[arg(default_value = "")]
        query: String,
    },

    /// List all known plugins.
    List,

    /// Assemble a dev plugin from its manifest and dispatch it.
    Dev {
        /// Plugin root directory containing plugin.json
        path: PathBuf,

        /// Invocation command name
        cmd: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Search { query } => search(config, &query).await,
        Commands::List => list(config).await,
        Commands::Dev { path, cmd } => dev(&path, &cmd),
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn startup(config: CliConfig) -> Result<StateController<MemoryStore, FsDiscovery, NameMerge>> {
    let discovery = FsDiscovery::new(config.into_discovery());
    let mut controller = StateController::new(MemoryStore::new(), discovery, NameMerge);
    controller.init().await?;
    Ok(controller)
}

async fn search(config: CliConfig, query: &str) -> Result<()> {
    let mut controller = startup(config).await?;
    let results = controller.on_search(query).await?;
    if results.is_empty() {
        println!("no matches");
        return Ok(());
    }
    for result in results {
        println!("{:<24} {:<8} {}", result.name, result.kind, result.desc);
    }
    Ok(())
}

async fn list(config: CliConfig) -> Result<()> {
    let controller = startup(config).await?;
    for plugin in controller.total_plugins() {
        println!("{:<24} {:<8} {}", plugin.name, plugin.kind, plugin.desc);
    }
    Ok(())
}

fn dev(path: &Path, cmd: &str) -> Result<()> {
    let dispatcher = Dispatcher::new(ShellRunner, LogTransport);
    dispatcher.open_dev_plugin(path, PluginKind::Dev, cmd)?;
    Ok(())
}
