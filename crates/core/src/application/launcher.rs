// Process Launcher - fire-and-forget background drain

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::command_builder::CommandBuilder;
use crate::application::panic_guard::{execute_guarded_async, PanicGuardResult};
use crate::domain::{LaunchCommand, LaunchResult};
use crate::port::{LaunchLog, LogEntry, ProcessRunner};

/// Spawns the drain command and reports the outcome
///
/// Never fails: every error is logged and turned into a best-effort
/// [`LaunchResult`]. No handle to the worker is kept.
pub struct ProcessLauncher {
    builder: CommandBuilder,
    runner: Arc<dyn ProcessRunner>,
    log: Arc<dyn LaunchLog>,
    working_dir: PathBuf,
}

impl ProcessLauncher {
    /// Create a new launcher
    ///
    /// # Arguments
    /// * `builder` - Composes the command for each launch
    /// * `runner` - Child-process facility
    /// * `log` - Logging collaborator
    /// * `working_dir` - Host base directory the worker runs from
    pub fn new(
        builder: CommandBuilder,
        runner: Arc<dyn ProcessRunner>,
        log: Arc<dyn LaunchLog>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            builder,
            runner,
            log,
            working_dir: working_dir.into(),
        }
    }

    /// Build a fresh command and launch it from the host base directory
    pub async fn launch(&self) -> LaunchResult {
        let command = self.builder.build();
        self.launch_command(command.as_ref(), &self.working_dir)
            .await
    }

    /// Launch an already composed command
    ///
    /// An absent command short-circuits without touching the runner.
    pub async fn launch_command(
        &self,
        command: Option<&LaunchCommand>,
        working_dir: &Path,
    ) -> LaunchResult {
        let Some(command) = command else {
            self.log.record(LogEntry::RuntimeNotFound);
            return LaunchResult::not_started();
        };

        self.log.record(LogEntry::Launching {
            command: command.to_string(),
            working_dir: working_dir.to_path_buf(),
        });

        let outcome = execute_guarded_async(self.runner.run(command, working_dir)).await;

        let result = match outcome {
            PanicGuardResult::Success(Ok(result)) => result,
            PanicGuardResult::Success(Err(e)) => {
                self.log.record(LogEntry::LaunchFailed(e.to_string()));
                LaunchResult::not_started()
            }
            PanicGuardResult::Panicked(msg) => {
                self.log
                    .record(LogEntry::LaunchFailed(format!("runner panicked: {}", msg)));
                LaunchResult::not_started()
            }
        };

        self.log.record(LogEntry::Launched(result.clone()));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BackgroundStrategy, LaunchStatus};
    use crate::port::launch_log::mocks::RecordingLaunchLog;
    use crate::port::process_runner::mocks::{MockBehavior, MockProcessRunner};
    use crate::port::runtime_locator::mocks::MockRuntimeLocator;
    use std::time::{Duration, Instant};

    fn launcher(
        locator: MockRuntimeLocator,
        strategy: BackgroundStrategy,
        runner: Arc<MockProcessRunner>,
        log: Arc<RecordingLaunchLog>,
    ) -> ProcessLauncher {
        let builder = CommandBuilder::new(Arc::new(locator), strategy);
        ProcessLauncher::new(builder, runner, log, "/srv/app")
    }

    #[tokio::test]
    async fn test_launch_success_logs_before_and_after() {
        let runner = Arc::new(MockProcessRunner::new_success());
        let log = Arc::new(RecordingLaunchLog::new());
        let l = launcher(
            MockRuntimeLocator::found("/bin/app"),
            BackgroundStrategy::Posix,
            runner.clone(),
            log.clone(),
        );

        let result = l.launch().await;

        assert_eq!(result, LaunchResult::terminated(Some(0)));
        assert_eq!(runner.call_count(), 1);
        assert_eq!(runner.calls()[0].1, PathBuf::from("/srv/app"));
        assert_eq!(
            log.entries(),
            vec![
                LogEntry::Launching {
                    command: "nice /bin/app queue run > /dev/null 2>&1 &".to_string(),
                    working_dir: PathBuf::from("/srv/app"),
                },
                LogEntry::Launched(LaunchResult::terminated(Some(0))),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_runtime_never_calls_runner() {
        let runner = Arc::new(MockProcessRunner::new_success());
        let log = Arc::new(RecordingLaunchLog::new());
        let l = launcher(
            MockRuntimeLocator::missing(),
            BackgroundStrategy::Posix,
            runner.clone(),
            log.clone(),
        );

        let result = l.launch().await;

        assert_eq!(result.status, LaunchStatus::NotStarted);
        assert_eq!(runner.call_count(), 0);
        assert_eq!(log.entries(), vec![LogEntry::RuntimeNotFound]);
    }

    #[tokio::test]
    async fn test_spawn_failure_is_contained() {
        let runner = Arc::new(MockProcessRunner::new_fail("permission denied"));
        let log = Arc::new(RecordingLaunchLog::new());
        let l = launcher(
            MockRuntimeLocator::found("/bin/app"),
            BackgroundStrategy::Posix,
            runner.clone(),
            log.clone(),
        );

        let result = l.launch().await;

        assert_eq!(result.status, LaunchStatus::NotStarted);
        assert_eq!(result.exit_text(), "(not terminated)");
        let failures = log.count(|e| matches!(e, LogEntry::LaunchFailed(_)));
        assert_eq!(failures, 1);
        assert!(log.entries().contains(&LogEntry::LaunchFailed(
            "Spawn failed: permission denied".to_string()
        )));
    }

    #[tokio::test]
    async fn test_runner_panic_is_contained() {
        let runner = Arc::new(MockProcessRunner::new(MockBehavior::Panic(
            "boom".to_string(),
        )));
        let log = Arc::new(RecordingLaunchLog::new());
        let l = launcher(
            MockRuntimeLocator::found("/bin/app"),
            BackgroundStrategy::Posix,
            runner,
            log.clone(),
        );

        let result = l.launch().await;

        assert_eq!(result.status, LaunchStatus::NotStarted);
        assert_eq!(log.count(|e| matches!(e, LogEntry::LaunchFailed(_))), 1);
    }

    #[tokio::test]
    async fn test_background_syntax_returns_before_worker_completes() {
        let worker = Duration::from_secs(5);

        for strategy in [BackgroundStrategy::Posix, BackgroundStrategy::Windows] {
            let runner = Arc::new(MockProcessRunner::new_shell(worker));
            let l = launcher(
                MockRuntimeLocator::found("/bin/app"),
                strategy,
                runner.clone(),
                Arc::new(RecordingLaunchLog::new()),
            );

            let started = Instant::now();
            l.launch().await;

            assert!(started.elapsed() < worker, "{:?} launch blocked", strategy);
            assert_eq!(runner.workers_finished(), 0);
        }
    }

    #[tokio::test]
    async fn test_foreground_command_would_block() {
        // Same runner, command without background syntax
        let runner = Arc::new(MockProcessRunner::new_shell(Duration::from_millis(200)));
        let l = launcher(
            MockRuntimeLocator::found("/bin/app"),
            BackgroundStrategy::Posix,
            runner.clone(),
            Arc::new(RecordingLaunchLog::new()),
        );
        let foreground = LaunchCommand::new("nice /bin/app queue run");

        l.launch_command(Some(&foreground), Path::new("/srv/app"))
            .await;

        assert_eq!(runner.workers_finished(), 1);
    }
}
