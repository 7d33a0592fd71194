// Platform Background Strategy

use std::borrow::Cow;

const POSIX_SUFFIX: &str = " > /dev/null 2>&1 &";
const WINDOWS_PREFIX: &str = "start /B ";
const WINDOWS_SUFFIX: &str = " > NUL";

/// How a composed command is detached from the launching shell
///
/// Selected once at startup and injected into the command builder.
/// Both variants make the shell return before the worker finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundStrategy {
    /// Trailing `&` with stdout and stderr sent to `/dev/null`
    Posix,
    /// `start /B` with stdout sent to `NUL`
    Windows,
}

impl BackgroundStrategy {
    /// Strategy for the platform this binary runs on
    pub fn detect() -> Self {
        if cfg!(windows) {
            BackgroundStrategy::Windows
        } else {
            BackgroundStrategy::Posix
        }
    }

    /// Leading token that lowers the worker's scheduling priority
    ///
    /// Windows has no `nice`; `start /LOW` is used there instead.
    pub fn priority_prefix(&self) -> Option<&'static str> {
        match self {
            BackgroundStrategy::Posix => Some("nice"),
            BackgroundStrategy::Windows => None,
        }
    }

    /// Wrap a composed command in the platform's background syntax
    pub fn apply(&self, command: &str) -> String {
        match self {
            BackgroundStrategy::Posix => format!("{}{}", command, POSIX_SUFFIX),
            BackgroundStrategy::Windows => {
                // start treats a leading quoted argument as the window title
                let title = if command.starts_with('"') { "\"\" " } else { "" };
                format!("{}/LOW {}{}{}", WINDOWS_PREFIX, title, command, WINDOWS_SUFFIX)
            }
        }
    }

    /// True if `command` already carries this strategy's background syntax
    pub fn is_backgrounded(&self, command: &str) -> bool {
        match self {
            BackgroundStrategy::Posix => {
                let trimmed = command.trim_end();
                trimmed.ends_with('&') && !trimmed.ends_with("&&")
            }
            BackgroundStrategy::Windows => command.starts_with(WINDOWS_PREFIX),
        }
    }

    /// Quote a single command token for this platform's shell
    pub fn quote<'a>(&self, token: &'a str) -> Cow<'a, str> {
        match self {
            BackgroundStrategy::Posix => {
                let safe = !token.is_empty()
                    && token
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c));
                if safe {
                    Cow::Borrowed(token)
                } else {
                    Cow::Owned(format!("'{}'", token.replace('\'', "'\\''")))
                }
            }
            BackgroundStrategy::Windows => {
                let safe = !token.is_empty()
                    && !token
                        .chars()
                        .any(|c| c.is_whitespace() || "\"&|<>^()%!".contains(c));
                if safe {
                    Cow::Borrowed(token)
                } else {
                    Cow::Owned(format!("\"{}\"", token.replace('"', "\"\"")))
                }
            }
        }
    }
}
