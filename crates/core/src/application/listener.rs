// Enqueue Listener - reacts to queue pushes with a background launch

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::launcher::ProcessLauncher;
use crate::domain::{EnqueueNotification, Settings};
use crate::port::{HostSettings, LaunchLog, LogEntry, Notifier};

/// Stateless push handler
///
/// Per event: turn off host auto-drain, log the job description, launch.
/// With `settings.enabled == false` it does nothing beyond a debug line,
/// leaving the host's own drain behavior in place.
pub struct EnqueueListener {
    settings: Settings,
    host: Arc<dyn HostSettings>,
    launcher: Arc<ProcessLauncher>,
    log: Arc<dyn LaunchLog>,
}

impl EnqueueListener {
    pub fn new(
        settings: Settings,
        host: Arc<dyn HostSettings>,
        launcher: Arc<ProcessLauncher>,
        log: Arc<dyn LaunchLog>,
    ) -> Self {
        Self {
            settings,
            host,
            launcher,
            log,
        }
    }
}

#[async_trait]
impl Notifier for EnqueueListener {
    async fn on_item_enqueued(&self, event: &EnqueueNotification) {
        if !self.settings.enabled {
            self.log.record(LogEntry::Disabled);
            return;
        }

        // Idempotent, repeated on every push
        self.host.set_auto_drain(false);

        if let Some(description) = event.description() {
            self.log
                .record(LogEntry::JobDescription(description.to_string()));
        }

        self.launcher.launch().await;
    }
}
