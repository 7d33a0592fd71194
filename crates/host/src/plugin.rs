// Plugin wiring - connects the launcher core to this host

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use async_queue_core::application::{CommandBuilder, EnqueueListener, ProcessLauncher};
use async_queue_core::domain::{BackgroundStrategy, Settings};
use async_queue_core::port::{HostSettings, LaunchLog, Notifier, TracingLaunchLog};
use async_queue_infra_system::{ExecutableFinder, ShellProcessRunner};

/// Build the push listener for this host
///
/// The worker is this same binary, started from `base_path` with explicit
/// paths so it resolves the same queue regardless of its environment.
pub fn install(
    settings: Settings,
    host: Arc<dyn HostSettings>,
    base_path: &Path,
    settings_file: Option<&Path>,
) -> Arc<dyn Notifier> {
    let strategy = BackgroundStrategy::detect();
    let log: Arc<dyn LaunchLog> = Arc::new(TracingLaunchLog);

    let builder = CommandBuilder::new(Arc::new(ExecutableFinder::current_exe()), strategy)
        .with_drain_subcommand(drain_subcommand(base_path, settings_file));
    let launcher = Arc::new(ProcessLauncher::new(
        builder,
        Arc::new(ShellProcessRunner::new()),
        log.clone(),
        base_path,
    ));

    info!(
        strategy = ?strategy,
        enabled = settings.enabled,
        concurrency = settings.concurrency,
        pool_lifetime = settings.pool_lifetime,
        "Async queue installed (concurrency is advisory)"
    );

    Arc::new(EnqueueListener::new(settings, host, launcher, log))
}

fn drain_subcommand(base_path: &Path, settings_file: Option<&Path>) -> Vec<String> {
    let mut tokens = vec![
        "--base-path".to_string(),
        base_path.to_string_lossy().into_owned(),
    ];
    if let Some(file) = settings_file {
        tokens.push("--settings-file".to_string());
        tokens.push(file.to_string_lossy().into_owned());
    }
    tokens.extend(["queue".to_string(), "run".to_string()]);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_subcommand_pins_paths() {
        let tokens = drain_subcommand(Path::new("/srv/app"), Some(Path::new("/etc/aq.json")));

        assert_eq!(
            tokens,
            vec![
                "--base-path",
                "/srv/app",
                "--settings-file",
                "/etc/aq.json",
                "queue",
                "run"
            ]
        );
    }

    #[test]
    fn test_drain_subcommand_without_settings_file() {
        let tokens = drain_subcommand(Path::new("/srv/app"), None);
        assert_eq!(tokens, vec!["--base-path", "/srv/app", "queue", "run"]);
    }
}
