// Port Layer - Interfaces for external dependencies

pub mod env_provider; // For deterministic testing
pub mod host_settings;
pub mod launch_log;
pub mod notifier;
pub mod process_runner;
pub mod runtime_locator;

// Re-exports
pub use env_provider::{EnvProvider, SystemEnvProvider};
pub use host_settings::{AutoDrainFlag, HostSettings};
pub use launch_log::{LaunchLog, LogEntry, TracingLaunchLog, LOG_TARGET};
pub use notifier::Notifier;
pub use process_runner::{LaunchError, ProcessRunner};
pub use runtime_locator::RuntimeLocator;
