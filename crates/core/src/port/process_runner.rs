// Process Runner Port
// Abstraction over the OS child-process facility used for launches

use crate::domain::{LaunchCommand, LaunchResult};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Launch errors
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Invalid working directory: {0}")]
    WorkingDirectory(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Process Runner trait
///
/// Implementations:
/// - ShellProcessRunner: runs the command through the platform shell
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a shell command in `working_dir`, waiting only for the shell
    ///
    /// The command carries its own background syntax, so returning does not
    /// mean the worker finished, only that it was told to start.
    ///
    /// # Errors
    /// - LaunchError::SpawnFailed if the shell cannot be started
    /// - LaunchError::WorkingDirectory if `working_dir` is unusable
    async fn run(
        &self,
        command: &LaunchCommand,
        working_dir: &Path,
    ) -> Result<LaunchResult, LaunchError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::BackgroundStrategy;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Shell exits immediately with this code
        Exit(i32),
        /// Spawning fails with message
        Fail(String),
        /// Panic with message (for boundary testing)
        Panic(String),
        /// Behave like a shell running a worker that takes `Duration`:
        /// backgrounded commands return at once, others block until done
        Shell(Duration),
    }
    /// Mock Process Runner for testing
    pub struct MockProcessRunner {
        behavior: MockBehavior,
        calls: Mutex<Vec<(LaunchCommand, PathBuf)>>,
        workers_finished: Arc<AtomicUsize>,
    }
    impl MockProcessRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                calls: Mutex::new(Vec::new()),
                workers_finished: Arc::new(AtomicUsize::new(0)),
            }
        }
        pub fn new_success() -> Self {
            Self::new(MockBehavior::Exit(0))
        }
        pub fn new_fail(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(message.into()))
        }
        pub fn new_shell(worker_duration: Duration) -> Self {
            Self::new(MockBehavior::Shell(worker_duration))
        }
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
        pub fn calls(&self) -> Vec<(LaunchCommand, PathBuf)> {
            self.calls.lock().unwrap().clone()
        }
        /// Simulated workers that ran to completion
        pub fn workers_finished(&self) -> usize {
            self.workers_finished.load(Ordering::SeqCst)
        }
    }
    #[async_trait]
    impl ProcessRunner for MockProcessRunner {
        async fn run(
            &self,
            command: &LaunchCommand,
            working_dir: &Path,
        ) -> Result<LaunchResult, LaunchError> {
            self.calls
                .lock()
                .unwrap()
                .push((command.clone(), working_dir.to_path_buf()));

            match &self.behavior {
                MockBehavior::Exit(code) => Ok(LaunchResult::terminated(Some(*code))),
                MockBehavior::Fail(msg) => Err(LaunchError::SpawnFailed(msg.clone())),
                MockBehavior::Panic(msg) => panic!("{}", msg),
                MockBehavior::Shell(worker) => {
                    let worker = *worker;
                    let finished = self.workers_finished.clone();
                    let detached = BackgroundStrategy::Posix.is_backgrounded(command.as_str())
                        || BackgroundStrategy::Windows.is_backgrounded(command.as_str());

                    if detached {
                        tokio::spawn(async move {
                            tokio::time::sleep(worker).await;
                            finished.fetch_add(1, Ordering::SeqCst);
                        });
                    } else {
                        tokio::time::sleep(worker).await;
                        finished.fetch_add(1, Ordering::SeqCst);
                    }
                    Ok(LaunchResult::terminated(Some(0)))
                }
            }
        }
    }
}
