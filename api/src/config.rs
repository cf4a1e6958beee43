//! Configuration loading for the API server.
//!
//! Values are resolved in three layers, later layers winning:
//! 1. `AppConfig::from_env()` (plain environment variables and `.env`)
//! 2. an optional `config/<environment>.toml` file
//! 3. `APP__SECTION__FIELD` environment overrides, e.g. `APP__SERVER__PORT=9000`

use av_shared::AppConfig;
use config::{Config, ConfigError, Environment as EnvSource, File};

/// Prefix for layered environment overrides
pub const ENV_PREFIX: &str = "APP";

/// Load the full application configuration
pub fn load() -> Result<AppConfig, ConfigError> {
    let base = AppConfig::from_env();
    layer(base, EnvSource::with_prefix(ENV_PREFIX).separator("__"))
}

fn layer(base: AppConfig, overrides: EnvSource) -> Result<AppConfig, ConfigError> {
    let config_file = base.environment.config_file().to_string();

    Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::with_name(&config_file).required(false))
        .add_source(overrides.try_parsing(true))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> EnvSource {
        let source: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvSource::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(Some(source))
    }

    #[test]
    fn test_layer_keeps_base_values() {
        let base = AppConfig::default();
        let loaded = layer(base.clone(), overrides(&[])).unwrap();

        assert_eq!(loaded.server.port, base.server.port);
        assert_eq!(loaded.verification, base.verification);
    }

    #[test]
    fn test_env_overrides_win() {
        let loaded = layer(
            AppConfig::default(),
            overrides(&[
                ("APP__SERVER__PORT", "9100"),
                ("APP__VERIFICATION__MAX_ATTEMPTS", "3"),
            ]),
        )
        .unwrap();

        assert_eq!(loaded.server.port, 9100);
        assert_eq!(loaded.verification.max_attempts, 3);
    }
}
