// Async Queue Infrastructure - System Adapters
// Implements: ProcessRunner, RuntimeLocator

pub mod executable_finder;
pub mod shell_runner;

pub use executable_finder::ExecutableFinder;
pub use shell_runner::ShellProcessRunner;
