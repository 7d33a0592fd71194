// Launch Domain Model

use std::fmt;

/// Placeholder exit text while no exit code is known
pub const NOT_TERMINATED: &str = "(not terminated)";

/// Fully composed shell command for one background launch
///
/// Built fresh for every launch, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand(String);

impl LaunchCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self(command.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State of the launching shell when the launcher stopped waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStatus {
    NotStarted,
    Running,
    Terminated,
}

impl fmt::Display for LaunchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchStatus::NotStarted => write!(f, "not started"),
            LaunchStatus::Running => write!(f, "running"),
            LaunchStatus::Terminated => write!(f, "terminated"),
        }
    }
}

/// Outcome of a single launch, used for one log line and then dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchResult {
    pub status: LaunchStatus,
    pub exit_code: Option<i32>,
}

impl LaunchResult {
    pub fn not_started() -> Self {
        Self {
            status: LaunchStatus::NotStarted,
            exit_code: None,
        }
    }

    pub fn running() -> Self {
        Self {
            status: LaunchStatus::Running,
            exit_code: None,
        }
    }

    pub fn terminated(exit_code: Option<i32>) -> Self {
        Self {
            status: LaunchStatus::Terminated,
            exit_code,
        }
    }

    /// Exit code description, or [`NOT_TERMINATED`] when there is no code
    pub fn exit_text(&self) -> &'static str {
        match self.exit_code {
            Some(code) => exit_code_text(code).unwrap_or("Unknown error"),
            None => NOT_TERMINATED,
        }
    }
}

/// Conventional shell meaning of an exit code (128 + N is signal N)
pub fn exit_code_text(code: i32) -> Option<&'static str> {
    let text = match code {
        0 => "OK",
        1 => "General error",
        2 => "Misuse of shell builtins",
        126 => "Invoked command cannot execute",
        127 => "Command not found",
        128 => "Invalid exit argument",
        129 => "Hangup",
        130 => "Interrupt",
        131 => "Quit and dump core",
        132 => "Illegal instruction",
        133 => "Trace/breakpoint trap",
        134 => "Process aborted",
        135 => "Bus error: \"access to undefined portion of memory object\"",
        136 => "Floating point exception: \"erroneous arithmetic operation\"",
        137 => "Kill (terminate immediately)",
        138 => "User-defined 1",
        139 => "Segmentation violation",
        140 => "User-defined 2",
        141 => "Write to pipe with no one reading",
        142 => "Signal raised by alarm",
        143 => "Termination (request to terminate)",
        _ => return None,
    };
    Some(text)
}
