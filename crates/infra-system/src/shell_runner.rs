// Shell process runner
// reason: tokio for async process management, nix for session detachment
use async_trait::async_trait;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use async_queue_core::application::constants::SPAWN_TIMEOUT;
use async_queue_core::domain::{LaunchCommand, LaunchResult};
use async_queue_core::port::{LaunchError, ProcessRunner};

/// Runs launch commands through the platform shell (`sh -c` / `cmd /C`)
///
/// All standard streams are bound to null and no child handle outlives
/// [`ProcessRunner::run`]. On Unix the shell starts its own session, so the
/// backgrounded worker is not tied to the host's terminal or process group.
pub struct ShellProcessRunner {
    spawn_timeout: Duration,
}

impl ShellProcessRunner {
    pub fn new() -> Self {
        Self::with_spawn_timeout(SPAWN_TIMEOUT)
    }

    /// Create a runner that stops waiting for the shell after `spawn_timeout`
    pub fn with_spawn_timeout(spawn_timeout: Duration) -> Self {
        Self { spawn_timeout }
    }

    /// Spawn the shell and wait for it, never for the worker
    async fn spawn_and_wait(
        &self,
        command: &str,
        working_dir: &Path,
    ) -> Result<LaunchResult, LaunchError> {
        let mut child = shell_command(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| LaunchError::SpawnFailed(e.to_string()))?;

        debug!(pid = ?child.id(), "Launch shell spawned");

        match timeout(self.spawn_timeout, child.wait()).await {
            Ok(Ok(status)) => Ok(LaunchResult::terminated(exit_code(status))),
            Ok(Err(e)) => Err(LaunchError::IoError(e.to_string())),
            Err(_) => {
                // Dropping the handle does not kill the shell
                warn!(
                    timeout_ms = self.spawn_timeout.as_millis() as u64,
                    "Launch shell still running, no longer waiting"
                );
                Ok(LaunchResult::running())
            }
        }
    }
}

impl Default for ShellProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for ShellProcessRunner {
    async fn run(
        &self,
        command: &LaunchCommand,
        working_dir: &Path,
    ) -> Result<LaunchResult, LaunchError> {
        if !working_dir.is_dir() {
            return Err(LaunchError::WorkingDirectory(
                working_dir.display().to_string(),
            ));
        }
        self.spawn_and_wait(command.as_str(), working_dir).await
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);

    // SAFETY: setsid is async-signal-safe and touches no parent state
    unsafe {
        cmd.pre_exec(|| {
            nix::unistd::setsid()
                .map(|_| ())
                .map_err(std::io::Error::from)
        });
    }
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;

    let mut cmd = Command::new("cmd");
    // Passed verbatim: the command already carries cmd.exe quoting
    cmd.arg("/C").raw_arg(command).creation_flags(CREATE_NO_WINDOW);
    cmd
}

/// Exit code of the shell; signal N maps to 128 + N like the shell does
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;

    status.code().or_else(|| status.signal().map(|sig| 128 + sig))
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> Option<i32> {
    status.code()
}
