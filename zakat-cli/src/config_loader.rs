//! Persistent CLI Configuration Loader
//!
//! Configuration is loaded from `~/.config/zakat-calc/config.toml` on Linux,
//! `~/Library/Application Support/zakat-calc/config.toml` on macOS or
//! `%APPDATA%\zakat-calc\config.toml` on Windows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use zakat_calc::prelude::*;
use zakat_calc::pricing::{GOLD_PRICE_ENV, SILVER_PRICE_ENV};

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Default gold price per gram.
    pub gold_price: Option<Decimal>,
    /// Default silver price per gram.
    pub silver_price: Option<Decimal>,
    /// Currency code shown before amounts (e.g., "PKR").
    pub currency: Option<String>,
    /// Nisab policy ("value-based", "unit-threshold").
    pub nisab_policy: Option<String>,
    /// Nisab standard ("gold", "silver", "lower-of-two").
    pub nisab_standard: Option<String>,
    /// Directory reports are exported to when no path is given.
    pub export_dir: Option<PathBuf>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub gold_price: Option<Decimal>,
    pub silver_price: Option<Decimal>,
    pub nisab_policy: Option<NisabPolicy>,
    pub nisab_standard: Option<NisabStandard>,
}

impl CliConfig {
    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zakat-calc"))
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Loads configuration from the default config file location.
    ///
    /// A missing file (or no config directory) yields `CliConfig::default()`.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load() -> Result<Self, ZakatError> {
        let Some(path) = Self::config_path() else {
            debug!("Could not determine config directory");
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ZakatError> {
        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ZakatError::Configuration(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content).map_err(|e| {
            ZakatError::Configuration(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<CliConfig>(content)
    }

    /// Builds the engine configuration.
    ///
    /// Precedence: command-line overrides, then `ZAKAT_GOLD_PRICE` /
    /// `ZAKAT_SILVER_PRICE`, then this file, then built-in defaults.
    pub fn resolve(&self, overrides: &Overrides) -> Result<ZakatConfig, ZakatError> {
        self.resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Same as [`resolve`](Self::resolve) with the environment supplied by `env`.
    pub fn resolve_with(
        &self,
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ZakatConfig, ZakatError> {
        let env_gold = env_price(&env, GOLD_PRICE_ENV)?;
        let env_silver = env_price(&env, SILVER_PRICE_ENV)?;

        let mut config = ZakatConfig::default();
        if let Some(code) = &self.currency {
            config = config.with_currency_code(code.clone());
        }
        if let Some(policy) = &self.nisab_policy {
            config.nisab_policy = NisabPolicy::from_str(policy)
                .map_err(|_| ZakatError::Configuration(format!("Unknown nisab-policy '{}'", policy)))?;
        }
        if let Some(standard) = &self.nisab_standard {
            config.nisab_standard = NisabStandard::from_str(standard)
                .map_err(|_| ZakatError::Configuration(format!("Unknown nisab-standard '{}'", standard)))?;
        }

        let gold = overrides
            .gold_price
            .or(env_gold)
            .or(self.gold_price)
            .unwrap_or(config.gold_price_per_gram);
        let silver = overrides
            .silver_price
            .or(env_silver)
            .or(self.silver_price)
            .unwrap_or(config.silver_price_per_gram);
        config = config.with_prices(Prices::new(gold, silver)?);

        if let Some(policy) = overrides.nisab_policy {
            config.nisab_policy = policy;
        }
        if let Some(standard) = overrides.nisab_standard {
            config.nisab_standard = standard;
        }

        config.validate()?;
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// Directory for exported reports: the configured one or the working directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Each variable is read on its own; unset is `None`, malformed or negative is an error.
fn env_price(env: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<Decimal>, ZakatError> {
    let Some(raw) = env(name) else {
        return Ok(None);
    };
    let price = Decimal::from_str(raw.trim())
        .map_err(|e| ZakatError::Configuration(format!("Invalid {} '{}': {}", name, raw, e)))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ZakatError::Configuration(format!("{} must be non-negative, got {}", name, raw)));
    }
    Ok(Some(price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_default() {
        let config = CliConfig::default();
        assert!(config.gold_price.is_none());
        assert!(config.currency.is_none());
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_config_parsing() {
        let config = CliConfig::parse(
            r#"
            gold-price = "18000"
            nisab-policy = "unit-threshold"
            currency = "PKR"
            "#,
        )
        .unwrap();
        assert_eq!(config.gold_price, Some(dec!(18000)));
        assert_eq!(config.nisab_policy.as_deref(), Some("unit-threshold"));
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_overrides_win() {
        let file = CliConfig {
            silver_price: Some(dec!(150)),
            nisab_policy: Some("unit-threshold".to_string()),
            ..Default::default()
        };
        let overrides = Overrides {
            silver_price: Some(dec!(250)),
            nisab_policy: Some(NisabPolicy::ValueBased),
            ..Default::default()
        };
        let env = |name: &str| (name == SILVER_PRICE_ENV).then(|| "300".to_string());

        let config = file.resolve_with(&overrides, env).unwrap();
        assert_eq!(config.silver_price_per_gram, dec!(250));
        assert_eq!(config.nisab_policy, NisabPolicy::ValueBased);
    }

    #[test]
    fn test_single_env_price_is_used() {
        let file = CliConfig {
            gold_price: Some(dec!(18000)),
            silver_price: Some(dec!(150)),
            ..Default::default()
        };
        let env = |name: &str| (name == GOLD_PRICE_ENV).then(|| "20000".to_string());

        let config = file.resolve_with(&Overrides::default(), env).unwrap();
        assert_eq!(config.gold_price_per_gram, dec!(20000));
        // Silver is not set in the environment, so the file value applies.
        assert_eq!(config.silver_price_per_gram, dec!(150));
    }

    #[test]
    fn test_file_then_defaults_without_env() {
        let file = CliConfig {
            gold_price: Some(dec!(18000)),
            ..Default::default()
        };
        let config = file.resolve_with(&Overrides::default(), no_env).unwrap();
        assert_eq!(config.gold_price_per_gram, dec!(18000));
        assert_eq!(config.silver_price_per_gram, dec!(200));
    }

    #[test]
    fn test_bad_env_price_is_an_error() {
        let malformed = |name: &str| (name == SILVER_PRICE_ENV).then(|| "two hundred".to_string());
        let err = CliConfig::default().resolve_with(&Overrides::default(), malformed).unwrap_err();
        assert!(matches!(err, ZakatError::Configuration(ref msg) if msg.contains(SILVER_PRICE_ENV)));

        let negative = |name: &str| (name == GOLD_PRICE_ENV).then(|| "-5".to_string());
        let err = CliConfig::default().resolve_with(&Overrides::default(), negative).unwrap_err();
        assert!(matches!(err, ZakatError::Configuration(ref msg) if msg.contains(GOLD_PRICE_ENV)));
    }

    #[test]
    fn test_missing_config_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_invalid_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "gold-price = [not toml").unwrap();

        let err = CliConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ZakatError::Configuration(ref msg) if msg.contains("config.toml")));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let file = CliConfig {
            nisab_policy: Some("whatever".to_string()),
            ..Default::default()
        };
        assert!(file.resolve_with(&Overrides::default(), no_env).is_err());
    }
}
