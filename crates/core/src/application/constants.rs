// Launcher constants (No magic values)
use std::time::Duration;

/// Default drain subcommand tokens appended after the runtime and its flags
pub const DEFAULT_DRAIN_SUBCOMMAND: &[&str] = &["queue", "run"];

/// Upper bound on waiting for the launching shell to return (10s)
/// The shell backgrounds the worker, so this is only hit if something is wrong
pub const SPAWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Explicit runtime executable, checked before any PATH search
pub const RUNTIME_ENV: &str = "ASYNC_QUEUE_RUNTIME";
