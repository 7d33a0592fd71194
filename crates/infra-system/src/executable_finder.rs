// Runtime locator implementation
// reason: which for cross-platform PATH / PATHEXT lookup
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use async_queue_core::application::constants::RUNTIME_ENV;
use async_queue_core::port::{EnvProvider, RuntimeLocator, SystemEnvProvider};

/// Where to look when no explicit runtime is configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeSource {
    /// The running binary drains its own queue
    CurrentExe,
    /// A named executable searched on `PATH`
    Named(String),
}

/// Finds the runtime executable
///
/// Search order:
/// 1. `ASYNC_QUEUE_RUNTIME`, if it names an executable (path or PATH entry)
/// 2. the configured [`RuntimeSource`]
pub struct ExecutableFinder {
    source: RuntimeSource,
    arguments: Vec<String>,
    env: Arc<dyn EnvProvider>,
}

impl ExecutableFinder {
    pub fn current_exe() -> Self {
        Self::new(RuntimeSource::CurrentExe)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(RuntimeSource::Named(name.into()))
    }

    fn new(source: RuntimeSource) -> Self {
        Self {
            source,
            arguments: Vec::new(),
            env: Arc::new(SystemEnvProvider),
        }
    }

    /// Flags passed to the runtime before the drain subcommand
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, env: Arc<dyn EnvProvider>) -> Self {
        self.env = env;
        self
    }

    fn from_env_override(&self) -> Option<PathBuf> {
        let configured = self.env.var(RUNTIME_ENV).filter(|v| !v.trim().is_empty())?;

        match which::which(configured.trim()) {
            Ok(path) => Some(path),
            Err(e) => {
                debug!(runtime = %configured, error = %e, "Configured runtime not executable");
                None
            }
        }
    }

    fn from_source(&self) -> Option<PathBuf> {
        match &self.source {
            RuntimeSource::CurrentExe => std::env::current_exe()
                .map_err(|e| debug!(error = %e, "Current executable unavailable"))
                .ok(),
            RuntimeSource::Named(name) => which::which(name)
                .map_err(|e| debug!(runtime = %name, error = %e, "Runtime not on PATH"))
                .ok(),
        }
    }
}

impl RuntimeLocator for ExecutableFinder {
    fn locate(&self) -> Option<PathBuf> {
        self.from_env_override().or_else(|| self.from_source())
    }

    fn arguments(&self) -> Vec<String> {
        self.arguments.clone()
    }
}
