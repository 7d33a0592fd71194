// Host Settings Port
// Capability handed to the listener instead of a process-wide global

use std::sync::atomic::{AtomicBool, Ordering};

/// Host configuration the listener is allowed to change
pub trait HostSettings: Send + Sync {
    /// Enable or disable draining the queue synchronously on requests
    fn set_auto_drain(&self, enabled: bool);
}

/// Auto-drain setting backed by an atomic, for hosts without their own store
#[derive(Debug)]
pub struct AutoDrainFlag {
    enabled: AtomicBool,
}

impl AutoDrainFlag {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

impl Default for AutoDrainFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl HostSettings for AutoDrainFlag {
    fn set_auto_drain(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Records every write so tests can count them
    #[derive(Debug, Default)]
    pub struct RecordingHostSettings {
        writes: Mutex<Vec<bool>>,
    }
    impl RecordingHostSettings {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn writes(&self) -> Vec<bool> {
            self.writes.lock().unwrap().clone()
        }
    }
    impl HostSettings for RecordingHostSettings {
        fn set_auto_drain(&self, enabled: bool) {
            self.writes.lock().unwrap().push(enabled);
        }
    }
}
