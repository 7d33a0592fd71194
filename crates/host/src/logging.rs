//! Logging setup
//!
//! Console output goes to stderr (`pretty` or `json`, chosen by
//! `ASYNC_QUEUE_LOG_FORMAT`). Detached workers have no console, so the
//! drain subcommand also writes JSON lines to `<base>/logs/worker.log.<date>`.

use anyhow::Result;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FORMAT_ENV: &str = "ASYNC_QUEUE_LOG_FORMAT";
const DEFAULT_FILTER: &str = "async_queue=info";

/// Initialize tracing; keep the returned guard alive until exit
pub fn init(base_path: &Path, worker_file: bool) -> Result<Option<WorkerGuard>> {
    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    let (file_layer, guard) = if worker_file {
        let log_dir = base_path.join("logs");
        std::fs::create_dir_all(&log_dir)?;
        let appender = tracing_appender::rolling::daily(log_dir, "worker.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(file_layer);

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            // Development: Pretty formatting with colors
            registry
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(guard)
}
