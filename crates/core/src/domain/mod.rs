// Domain Layer - Pure business logic and entities

pub mod launch;
pub mod notification;
pub mod platform;
pub mod settings;

// Re-exports
pub use launch::{exit_code_text, LaunchCommand, LaunchResult, LaunchStatus};
pub use notification::{EnqueueNotification, ItemRef};
pub use platform::BackgroundStrategy;
pub use settings::{coerce_int, Settings, SettingsOverrides};
