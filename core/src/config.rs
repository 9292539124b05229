//! Client configuration read from the environment, with explicit overrides
//! layered on top (typically from command-line flags). Values are public;
//! nothing secret lives here.

use std::time::Duration;

pub const BASE_URL_ENV: &str = "PORTAL_BASE_URL";
pub const TIMEOUT_ENV: &str = "PORTAL_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Values that replace the loaded configuration when present.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl PortalConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Defaults, then `PORTAL_BASE_URL` / `PORTAL_TIMEOUT_SECS`. Blank or
    /// unparsable values are ignored.
    pub fn load() -> Self {
        let mut config = Self::default();
        let env = ConfigOverrides {
            base_url: std::env::var(BASE_URL_ENV)
                .ok()
                .and_then(|v| normalize_value(&v)),
            timeout_secs: std::env::var(TIMEOUT_ENV)
                .ok()
                .and_then(|v| normalize_value(&v))
                .and_then(|v| v.parse().ok()),
        };
        config.apply_overrides(env);
        config
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(value) = overrides.base_url.as_deref().and_then(normalize_value) {
            self.base_url = value;
        }
        if let Some(secs) = overrides.timeout_secs.filter(|secs| *secs > 0) {
            self.timeout = Duration::from_secs(secs);
        }
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
