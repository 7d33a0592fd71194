// Settings Domain Model

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::port::env_provider::{EnvProvider, SystemEnvProvider};

/// Desired worker concurrency
pub const CONCURRENCY_ENV: &str = "ASYNC_QUEUE_CONCURRENCY";

/// Seconds a worker pool may live
pub const POOL_LIFETIME_ENV: &str = "ASYNC_QUEUE_POOL_LIFETIME";

/// `"1"` disables background launches
pub const DISABLE_ENV: &str = "DISABLE_ASYNC_QUEUE";

pub const DEFAULT_CONCURRENCY: i64 = 2;
pub const DEFAULT_POOL_LIFETIME_SECS: i64 = 3600;

/// Operating parameters for the launcher
///
/// Built once per process and never mutated afterwards. `concurrency` is
/// advisory: nothing in the launch path counts running workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub concurrency: i64,
    pub pool_lifetime: i64, // seconds
    pub enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            pool_lifetime: DEFAULT_POOL_LIFETIME_SECS,
            enabled: true,
        }
    }
}

impl Settings {
    /// Resolve settings from an environment source
    ///
    /// Missing variables fall back to their defaults. Numeric values are
    /// coerced with [`coerce_int`] and never rejected.
    pub fn load(env: &dyn EnvProvider) -> Self {
        let concurrency = env
            .var(CONCURRENCY_ENV)
            .map(|v| coerce_int(&v))
            .unwrap_or(DEFAULT_CONCURRENCY);

        let pool_lifetime = env
            .var(POOL_LIFETIME_ENV)
            .map(|v| coerce_int(&v))
            .unwrap_or(DEFAULT_POOL_LIFETIME_SECS);

        let enabled = env.var(DISABLE_ENV).as_deref() != Some("1");

        Self {
            concurrency,
            pool_lifetime,
            enabled,
        }
    }

    /// Resolve settings from the process environment
    pub fn from_env() -> Self {
        Self::load(&SystemEnvProvider)
    }

    /// Apply host-supplied overrides on top of the resolved values
    pub fn merge(mut self, overrides: &SettingsOverrides) -> Self {
        if let Some(concurrency) = overrides.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(pool_lifetime) = overrides.pool_lifetime {
            self.pool_lifetime = pool_lifetime;
        }
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        self
    }

    /// Pool lifetime as a duration, `None` when non-positive (unbounded)
    pub fn lifetime(&self) -> Option<Duration> {
        u64::try_from(self.pool_lifetime)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Optional per-field overrides (e.g. from a host settings file)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsOverrides {
    pub concurrency: Option<i64>,
    #[serde(alias = "poolLifetime")]
    pub pool_lifetime: Option<i64>,
    pub enabled: Option<bool>,
}

impl SettingsOverrides {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

/// Lenient integer coercion
///
/// Skips leading whitespace, accepts one sign, then reads leading digits.
/// Anything else yields 0. Out-of-range values saturate.
pub fn coerce_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 0;
    }

    match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::env_provider::mocks::MockEnvProvider;

    #[test]
    fn test_defaults_when_env_empty() {
        let settings = Settings::load(&MockEnvProvider::new());

        assert_eq!(
            settings,
            Settings {
                concurrency: 2,
                pool_lifetime: 3600,
                enabled: true,
            }
        );
    }

    #[test]
    fn test_disable_flag_exact_one() {
        let env = MockEnvProvider::new().with(DISABLE_ENV, "1");
        assert!(!Settings::load(&env).enabled);
    }

    #[test]
    fn test_disable_flag_other_values_keep_enabled() {
        for value in ["0", "", "true", "yes", " 1", "1 ", "01"] {
            let env = MockEnvProvider::new().with(DISABLE_ENV, value);
            assert!(Settings::load(&env).enabled, "value {:?} disabled", value);
        }
    }

    #[test]
    fn test_numeric_values_read_from_env() {
        let env = MockEnvProvider::new()
            .with(CONCURRENCY_ENV, "8")
            .with(POOL_LIFETIME_ENV, "60");

        let settings = Settings::load(&env);

        assert_eq!(settings.concurrency, 8);
        assert_eq!(settings.pool_lifetime, 60);
    }

    #[test]
    fn test_malformed_numbers_coerce_without_error() {
        let env = MockEnvProvider::new()
            .with(CONCURRENCY_ENV, "lots")
            .with(POOL_LIFETIME_ENV, "-5");

        let settings = Settings::load(&env);

        assert_eq!(settings.concurrency, 0);
        assert_eq!(settings.pool_lifetime, -5);
        assert_eq!(settings.lifetime(), None);
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int("42"), 42);
        assert_eq!(coerce_int("  12abc"), 12);
        assert_eq!(coerce_int("+7"), 7);
        assert_eq!(coerce_int("-"), 0);
        assert_eq!(coerce_int("abc"), 0);
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("99999999999999999999"), i64::MAX);
        assert_eq!(coerce_int("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_overrides_win_over_env() {
        let env = MockEnvProvider::new().with(DISABLE_ENV, "1");
        let overrides =
            SettingsOverrides::from_json_str(r#"{"poolLifetime": 120, "enabled": true}"#).unwrap();

        let settings = Settings::load(&env).merge(&overrides);

        assert_eq!(settings.concurrency, 2);
        assert_eq!(settings.pool_lifetime, 120);
        assert!(settings.enabled);
        assert_eq!(settings.lifetime(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_overrides_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"concurrency": 4}"#).unwrap();

        let overrides = SettingsOverrides::from_file(&path).unwrap();

        assert_eq!(overrides.concurrency, Some(4));
        assert_eq!(overrides.pool_lifetime, None);
    }

    #[test]
    fn test_overrides_reject_invalid_json() {
        let result = SettingsOverrides::from_json_str("{not json");
        assert!(result.is_err());
    }
}
