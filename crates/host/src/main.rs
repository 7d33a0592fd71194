//! Async Queue Host - Main Entry Point
//! Reference host: pushes hand the queue to a detached `queue run` worker

mod commands;
mod drain;
mod logging;
mod plugin;
mod queue;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use async_queue_core::port::{AutoDrainFlag, SystemEnvProvider};

use crate::queue::SpoolQueue;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_BASE_PATH: &str = ".";

#[derive(Parser)]
#[command(name = "async-queue-host", version, about = "Queue host with background drain workers")]
struct Cli {
    /// Host base directory (queue spool, logs, worker working directory)
    #[arg(long, env = "ASYNC_QUEUE_BASE_PATH", default_value = DEFAULT_BASE_PATH, global = true)]
    base_path: String,

    /// JSON file overriding concurrency / pool_lifetime / enabled
    #[arg(long, env = "ASYNC_QUEUE_SETTINGS", global = true)]
    settings_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Push a job and hand the queue to a background worker
    Push {
        /// Human-readable job description
        description: String,
    },
    /// Queue operations
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },
    /// Print the resolved settings as JSON
    Settings,
}

#[derive(Subcommand)]
enum QueueAction {
    /// Drain the queue until empty or the pool lifetime runs out
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Resolve base directory (absolute, so detached workers agree on it)
    let base_path = PathBuf::from(shellexpand::tilde(&cli.base_path).into_owned());
    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("creating base path {}", base_path.display()))?;
    let base_path = base_path.canonicalize()?;
    let settings_file = cli
        .settings_file
        .as_deref()
        .map(Path::canonicalize)
        .transpose()
        .context("resolving settings file")?;

    // 2. Initialize logging
    let is_worker = matches!(cli.command, Command::Queue { .. });
    let _log_guard = logging::init(&base_path, is_worker)?;

    info!("Async queue host v{} starting...", VERSION);

    // 3. Load configuration (env, then overrides file)
    let settings = commands::load_settings(&SystemEnvProvider, settings_file.as_deref())?;

    match cli.command {
        Command::Push { description } => {
            let queue = SpoolQueue::open(&base_path)?;
            let auto_drain = Arc::new(AutoDrainFlag::default());
            let notifier = plugin::install(
                settings.clone(),
                auto_drain.clone(),
                &base_path,
                settings_file.as_deref(),
            );
            commands::push(&queue, notifier.as_ref(), &auto_drain, &settings, description)
                .await?;
        }
        Command::Queue {
            action: QueueAction::Run,
        } => {
            let queue = SpoolQueue::open(&base_path)?;
            drain::run(&queue, &settings)?;
        }
        Command::Settings => println!("{}", serde_json::to_string_pretty(&settings)?),
    }

    Ok(())
}
