use portal_core::{ConfigOverrides, PortalConfig};

/// Settings shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: PortalConfig,
}

impl GlobalArgs {
    /// Environment-derived config with command-line overrides applied.
    #[must_use]
    pub fn new(overrides: ConfigOverrides) -> Self {
        let mut config = PortalConfig::load();
        config.apply_overrides(overrides);
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::config::{BASE_URL_ENV, TIMEOUT_ENV};
    use std::time::Duration;

    #[test]
    fn test_global_args() {
        temp_env::with_vars([(BASE_URL_ENV, None::<&str>), (TIMEOUT_ENV, None)], || {
            let args = GlobalArgs::new(ConfigOverrides {
                base_url: Some("https://auth.example.com/".to_string()),
                timeout_secs: None,
            });
            assert_eq!(args.config.base_url, "https://auth.example.com/");
            assert_eq!(args.config.timeout, Duration::from_secs(10));
        });
    }
}
