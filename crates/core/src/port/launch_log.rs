// Launch Log Port
// Narrow logging capability the launcher and listener report through

use crate::domain::LaunchResult;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Fixed category all launch log lines are emitted under
pub const LOG_TARGET: &str = "async_queue";

/// Lines the core emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Command and working directory, before spawning
    Launching { command: String, working_dir: PathBuf },
    /// Description of the job that triggered the launch
    JobDescription(String),
    /// Status and exit text after the spawn step returned
    Launched(LaunchResult),
    /// Spawn failed; the launch is abandoned for this event
    LaunchFailed(String),
    /// No runtime executable; nothing was spawned
    RuntimeNotFound,
    /// Launches are disabled by configuration
    Disabled,
}

/// Logging collaborator
pub trait LaunchLog: Send + Sync {
    fn record(&self, entry: LogEntry);
}

/// Emits entries as `tracing` events under [`LOG_TARGET`] (production)
pub struct TracingLaunchLog;

impl LaunchLog for TracingLaunchLog {
    fn record(&self, entry: LogEntry) {
        match entry {
            LogEntry::Launching {
                command,
                working_dir,
            } => info!(
                target: LOG_TARGET,
                cmd = %command,
                cwd = %working_dir.display(),
                "Starting background queue runner"
            ),
            LogEntry::JobDescription(description) => info!(
                target: LOG_TARGET,
                "Handling push event for '{}' job", description
            ),
            LogEntry::Launched(result) => info!(
                target: LOG_TARGET,
                status = %result.status,
                exit_code = ?result.exit_code,
                "Job status: {}. Exit code: {}", result.status, result.exit_text()
            ),
            LogEntry::LaunchFailed(error) => warn!(
                target: LOG_TARGET,
                error = %error,
                "Background queue runner failed to launch"
            ),
            LogEntry::RuntimeNotFound => warn!(
                target: LOG_TARGET,
                "No runtime executable found, skipping background launch"
            ),
            LogEntry::Disabled => debug!(
                target: LOG_TARGET,
                "Async queue disabled, leaving queue to the host"
            ),
        }
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every entry in memory
    #[derive(Debug, Default)]
    pub struct RecordingLaunchLog {
        entries: Mutex<Vec<LogEntry>>,
    }
    impl RecordingLaunchLog {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn entries(&self) -> Vec<LogEntry> {
            self.entries.lock().unwrap().clone()
        }
        pub fn count(&self, predicate: impl Fn(&LogEntry) -> bool) -> usize {
            self.entries.lock().unwrap().iter().filter(|e| predicate(e)).count()
        }
    }
    impl LaunchLog for RecordingLaunchLog {
        fn record(&self, entry: LogEntry) {
            // Still emit, so `RUST_LOG` shows test launches
            TracingLaunchLog.record(entry.clone());
            self.entries.lock().unwrap().push(entry);
        }
    }
}
