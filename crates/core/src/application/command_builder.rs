// Command Builder - composes the background drain command

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::constants::DEFAULT_DRAIN_SUBCOMMAND;
use crate::domain::{BackgroundStrategy, LaunchCommand};
use crate::port::RuntimeLocator;

/// Builds one [`LaunchCommand`] per launch
///
/// Layout: `<priority prefix> <runtime> <runtime flags> <drain subcommand>`,
/// then wrapped in the injected [`BackgroundStrategy`].
pub struct CommandBuilder {
    locator: Arc<dyn RuntimeLocator>,
    strategy: BackgroundStrategy,
    drain_subcommand: Vec<String>,
}

impl CommandBuilder {
    pub fn new(locator: Arc<dyn RuntimeLocator>, strategy: BackgroundStrategy) -> Self {
        Self {
            locator,
            strategy,
            drain_subcommand: DEFAULT_DRAIN_SUBCOMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replace the default `queue run` subcommand
    pub fn with_drain_subcommand<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drain_subcommand = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn locate_runtime(&self) -> Option<PathBuf> {
        self.locator.locate()
    }

    pub fn build_arguments(&self, _runtime: &Path) -> Vec<String> {
        self.locator.arguments()
    }

    /// Foreground drain command, without background syntax
    pub fn compose_drain_command(&self, runtime: &Path, flags: &[String]) -> String {
        let runtime = runtime.to_string_lossy();
        let mut tokens: Vec<String> = Vec::with_capacity(flags.len() + 4);

        if let Some(prefix) = self.strategy.priority_prefix() {
            tokens.push(prefix.to_string());
        }
        tokens.push(self.strategy.quote(&runtime).into_owned());
        tokens.extend(flags.iter().map(|f| self.strategy.quote(f).into_owned()));
        tokens.extend(
            self.drain_subcommand
                .iter()
                .map(|t| self.strategy.quote(t).into_owned()),
        );

        tokens.join(" ")
    }

    pub fn apply_background_syntax(&self, command: &str) -> String {
        self.strategy.apply(command)
    }

    /// Full launch command, or None when no runtime can be located
    pub fn build(&self) -> Option<LaunchCommand> {
        let runtime = self.locate_runtime()?;
        let flags = self.build_arguments(&runtime);
        let command = self.compose_drain_command(&runtime, &flags);
        Some(LaunchCommand::new(self.apply_background_syntax(&command)))
    }
}
