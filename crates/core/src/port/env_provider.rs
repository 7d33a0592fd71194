// Environment Provider Port (for testability)

/// Environment variable source (allows mocking in tests)
pub trait EnvProvider: Send + Sync {
    /// Value of `name`, or None when unset
    fn var(&self, name: &str) -> Option<String>;
}

/// Process environment (production)
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;

    /// Fixed in-memory environment
    #[derive(Debug, Clone, Default)]
    pub struct MockEnvProvider {
        vars: HashMap<String, String>,
    }
    impl MockEnvProvider {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
            self.vars.insert(name.into(), value.into());
            self
        }
    }
    impl EnvProvider for MockEnvProvider {
        fn var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }
    }
}
