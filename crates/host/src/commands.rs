// Host commands - push path and settings resolution

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use async_queue_core::domain::{Settings, SettingsOverrides};
use async_queue_core::port::{AutoDrainFlag, EnvProvider, Notifier};

use crate::drain::{self, DrainStats};
use crate::queue::SpoolQueue;

/// Settings from the environment, then the optional overrides file
pub fn load_settings(env: &dyn EnvProvider, settings_file: Option<&Path>) -> Result<Settings> {
    let settings = Settings::load(env);
    let Some(path) = settings_file else {
        return Ok(settings);
    };

    let overrides = SettingsOverrides::from_file(path)
        .with_context(|| format!("loading settings overrides from {}", path.display()))?;
    Ok(settings.merge(&overrides))
}

/// Enqueue one job and notify the listener
///
/// Returns the foreground drain stats when the listener left auto-drain on.
pub async fn push(
    queue: &SpoolQueue,
    notifier: &dyn Notifier,
    auto_drain: &AutoDrainFlag,
    settings: &Settings,
    description: String,
) -> Result<Option<DrainStats>> {
    let item = queue.push(Some(description))?;
    info!(id = %item.id, "Job queued");

    notifier.on_item_enqueued(&item.notification()).await;

    // Host default when nothing took the queue over: drain on the request
    if auto_drain.is_enabled() {
        info!("Auto-drain still enabled, draining in the foreground");
        return Ok(Some(drain::run(queue, settings)?));
    }

    Ok(None)
}
