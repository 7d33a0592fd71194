// Application Layer - Use Cases and Business Logic

pub mod command_builder;
pub mod constants;
pub mod launcher;
pub mod listener;
pub mod panic_guard;

// Re-exports
pub use command_builder::CommandBuilder;
pub use launcher::ProcessLauncher;
pub use listener::EnqueueListener;
