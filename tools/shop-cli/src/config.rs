//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::StoreConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store settings passed to the storefront.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Problems that make the config unusable.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = self.store.validate();
        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            errors.push(format!("logging.level '{}' is not a valid filter", self.logging.level));
        }
        errors
    }

    /// Settings that work but are probably unintended.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.store.cart.limit > 50 {
            warnings.push(format!(
                "store.cart.limit {} is far above the usual 10",
                self.store.cart.limit
            ));
        }
        if self.store.payment.delay_ms > 10_000 {
            warnings.push("store.payment.delay_ms is over 10 seconds".to_string());
        }
        warnings
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directive (default: warn). `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_level(),
        }
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[store]
currency = "PKR"

[store.cart]
limit = 10

[store.checkout]
delivery_fee = 500.0
clear_purchased_lines = true
validate_login = true

[store.payment]
delay_ms = 1500

[logging]
format = "compact"
level = "warn"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::Currency;

    #[test]
    fn test_default_config_file_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.errors().is_empty());
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CliConfig = toml::from_str("[store.cart]\nlimit = 3\n").unwrap();
        assert_eq!(config.store.cart.limit, 3);
        assert_eq!(config.store.currency, Currency::PKR);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_errors_and_warnings() {
        let mut config = CliConfig::default();
        config.store.cart.limit = 0;
        config.store.payment.delay_ms = 60_000;
        assert_eq!(config.errors().len(), 1);
        assert_eq!(config.warnings().len(), 1);
    }
}
