// Runtime Locator Port
// Finds the executable that runs the queue-drain subcommand

use std::path::PathBuf;

/// Runtime discovery
pub trait RuntimeLocator: Send + Sync {
    /// Path of the runtime executable, or None if none can be found
    fn locate(&self) -> Option<PathBuf>;

    /// Extra flags the runtime needs before the drain subcommand
    fn arguments(&self) -> Vec<String> {
        Vec::new()
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Locator returning a fixed answer
    #[derive(Debug, Default)]
    pub struct MockRuntimeLocator {
        path: Option<PathBuf>,
        arguments: Vec<String>,
        lookups: AtomicUsize,
    }
    impl MockRuntimeLocator {
        pub fn found(path: impl Into<PathBuf>) -> Self {
            Self {
                path: Some(path.into()),
                ..Self::default()
            }
        }
        pub fn missing() -> Self {
            Self::default()
        }
        pub fn with_arguments(mut self, arguments: &[&str]) -> Self {
            self.arguments = arguments.iter().map(|a| a.to_string()).collect();
            self
        }
        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }
    impl RuntimeLocator for MockRuntimeLocator {
        fn locate(&self) -> Option<PathBuf> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.path.clone()
        }
        fn arguments(&self) -> Vec<String> {
            self.arguments.clone()
        }
    }
}
