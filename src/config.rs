use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::builder::{AssetBuilder, Validate};
use crate::inputs::{IntoZakatDecimal, non_negative};
use crate::policy::{NisabPolicy, NisabStandard};
use crate::pricing::{EnvPriceProvider, PriceProvider, Prices};
use crate::types::ZakatError;

pub const DEFAULT_GOLD_PRICE_PER_GRAM: Decimal = dec!(17000);
pub const DEFAULT_SILVER_PRICE_PER_GRAM: Decimal = dec!(200);
pub const GRAMS_PER_TOLA: Decimal = dec!(11.664);
pub const NISAB_GOLD_GRAMS: Decimal = dec!(87.48);
pub const NISAB_SILVER_GRAMS: Decimal = dec!(612.36);
pub const GOLD_TOLA_THRESHOLD: Decimal = dec!(7.5);
pub const SILVER_TOLA_THRESHOLD: Decimal = dec!(52.5);
pub const CASH_THRESHOLD: Decimal = dec!(100000);
pub const ZAKAT_RATE: Decimal = dec!(0.025);

/// Prices, conversion factors and the Nisab policy used by a calculation.
///
/// Every constant the calculator depends on lives here so that valuation and
/// threshold logic can be exercised under any market prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ZakatConfig {
    pub gold_price_per_gram: Decimal,
    pub silver_price_per_gram: Decimal,
    /// Tola to gram conversion factor.
    pub grams_per_tola: Decimal,

    pub nisab_policy: NisabPolicy,
    /// Metal equivalent used by the value-based policy.
    pub nisab_standard: NisabStandard,
    pub nisab_gold_grams: Decimal,
    pub nisab_silver_grams: Decimal,

    // Unit policy minimums
    pub gold_tola_threshold: Decimal,
    pub silver_tola_threshold: Decimal,
    pub cash_threshold: Decimal,

    pub zakat_rate: Decimal,
    pub currency_code: String,
}

impl Default for ZakatConfig {
    fn default() -> Self {
        ZakatConfig {
            gold_price_per_gram: DEFAULT_GOLD_PRICE_PER_GRAM,
            silver_price_per_gram: DEFAULT_SILVER_PRICE_PER_GRAM,
            grams_per_tola: GRAMS_PER_TOLA,
            nisab_policy: NisabPolicy::default(),
            nisab_standard: NisabStandard::default(),
            nisab_gold_grams: NISAB_GOLD_GRAMS,
            nisab_silver_grams: NISAB_SILVER_GRAMS,
            gold_tola_threshold: GOLD_TOLA_THRESHOLD,
            silver_tola_threshold: SILVER_TOLA_THRESHOLD,
            cash_threshold: CASH_THRESHOLD,
            zakat_rate: ZAKAT_RATE,
            currency_code: "PKR".to_string(),
        }
    }
}

// Ensure the caller can easily create a config
impl std::str::FromStr for ZakatConfig {
    type Err = ZakatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ZakatConfig = serde_json::from_str(s)
            .map_err(|e| ZakatError::Configuration(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl ZakatConfig {
    pub fn builder() -> ZakatConfigBuilder {
        ZakatConfigBuilder::default()
    }

    pub fn new(gold_price: impl IntoZakatDecimal, silver_price: impl IntoZakatDecimal) -> Result<Self, ZakatError> {
        let prices = Prices::new(gold_price, silver_price)?;
        let config = Self::default().with_prices(prices);
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for logical consistency and safety.
    pub fn validate(&self) -> Result<(), ZakatError> {
        for (field, value) in [
            ("gold_price_per_gram", self.gold_price_per_gram),
            ("silver_price_per_gram", self.silver_price_per_gram),
            ("nisab_gold_grams", self.nisab_gold_grams),
            ("nisab_silver_grams", self.nisab_silver_grams),
            ("gold_tola_threshold", self.gold_tola_threshold),
            ("silver_tola_threshold", self.silver_tola_threshold),
            ("cash_threshold", self.cash_threshold),
            ("zakat_rate", self.zakat_rate),
        ] {
            if value < Decimal::ZERO {
                return Err(ZakatError::Configuration(format!("{} must be non-negative", field)));
            }
        }

        if self.grams_per_tola <= Decimal::ZERO {
            return Err(ZakatError::Configuration("grams_per_tola must be > 0".to_string()));
        }
        if self.zakat_rate > Decimal::ONE {
            return Err(ZakatError::Configuration("zakat_rate must not exceed 1".to_string()));
        }

        // The value-based policy needs the prices its standard refers to.
        if self.nisab_policy == NisabPolicy::ValueBased {
            let needs_gold = matches!(self.nisab_standard, NisabStandard::Gold | NisabStandard::LowerOfTwo);
            let needs_silver = matches!(self.nisab_standard, NisabStandard::Silver | NisabStandard::LowerOfTwo);
            if needs_gold && self.gold_price_per_gram <= Decimal::ZERO {
                return Err(ZakatError::MissingConfig { field: "gold_price_per_gram".to_string() });
            }
            if needs_silver && self.silver_price_per_gram <= Decimal::ZERO {
                return Err(ZakatError::MissingConfig { field: "silver_price_per_gram".to_string() });
            }
        }

        Ok(())
    }

    /// Loads the defaults with prices taken from `ZAKAT_GOLD_PRICE` / `ZAKAT_SILVER_PRICE`.
    pub fn from_env() -> Result<Self, ZakatError> {
        Self::from_provider(&EnvPriceProvider)
    }

    /// Attempts to load configuration from a JSON file. Missing fields take their defaults.
    pub fn try_from_json(path: impl AsRef<Path>) -> Result<Self, ZakatError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ZakatError::Configuration(format!("Failed to read config file {}: {}", path.display(), e)))?;
        content.parse()
    }

    pub fn from_provider(provider: &impl PriceProvider) -> Result<Self, ZakatError> {
        let prices = provider.get_prices()?;
        let config = Self::default().with_prices(prices);
        config.validate()?;
        Ok(config)
    }

    /// Refreshes the prices in this configuration using the given provider.
    pub fn refresh_prices(&mut self, provider: &impl PriceProvider) -> Result<(), ZakatError> {
        let prices = provider.get_prices()?;
        self.gold_price_per_gram = prices.gold_per_gram;
        self.silver_price_per_gram = prices.silver_per_gram;
        self.validate()?;
        tracing::debug!(gold = %prices.gold_per_gram, silver = %prices.silver_per_gram, "prices refreshed");
        Ok(())
    }

    // ========== Fluent Helper Methods ==========
    // Validation is enforced when calling `validate()` or using the builder.

    pub fn with_prices(mut self, prices: Prices) -> Self {
        self.gold_price_per_gram = prices.gold_per_gram;
        self.silver_price_per_gram = prices.silver_per_gram;
        self
    }

    pub fn with_nisab_policy(mut self, policy: NisabPolicy) -> Self {
        self.nisab_policy = policy;
        self
    }

    pub fn with_nisab_standard(mut self, standard: NisabStandard) -> Self {
        self.nisab_standard = standard;
        self
    }

    pub fn with_currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn prices(&self) -> Prices {
        Prices {
            gold_per_gram: self.gold_price_per_gram,
            silver_per_gram: self.silver_price_per_gram,
        }
    }

    /// Currency value of the Nisab under the given standard.
    pub fn monetary_nisab_threshold(&self, standard: NisabStandard) -> Result<Decimal, ZakatError> {
        let gold_threshold = self
            .nisab_gold_grams
            .checked_mul(self.gold_price_per_gram)
            .ok_or_else(|| ZakatError::overflow("gold nisab value"))?;
        let silver_threshold = self
            .nisab_silver_grams
            .checked_mul(self.silver_price_per_gram)
            .ok_or_else(|| ZakatError::overflow("silver nisab value"))?;

        Ok(match standard {
            NisabStandard::Gold => gold_threshold,
            NisabStandard::Silver => silver_threshold,
            NisabStandard::LowerOfTwo => gold_threshold.min(silver_threshold),
        })
    }
}

// ========== ZakatConfigBuilder ==========

#[derive(Default)]
pub struct ZakatConfigBuilder {
    gold_price: Option<Result<Decimal, ZakatError>>,
    silver_price: Option<Result<Decimal, ZakatError>>,
    grams_per_tola: Option<Result<Decimal, ZakatError>>,
    nisab_policy: Option<NisabPolicy>,
    nisab_standard: Option<NisabStandard>,
    zakat_rate: Option<Result<Decimal, ZakatError>>,
    currency_code: Option<String>,
}

impl ZakatConfigBuilder {
    pub fn gold_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.gold_price = Some(non_negative("gold_price_per_gram", price));
        self
    }

    pub fn silver_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.silver_price = Some(non_negative("silver_price_per_gram", price));
        self
    }

    pub fn grams_per_tola(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.grams_per_tola = Some(non_negative("grams_per_tola", grams));
        self
    }

    pub fn nisab_policy(mut self, policy: NisabPolicy) -> Self {
        self.nisab_policy = Some(policy);
        self
    }

    pub fn nisab_standard(mut self, standard: NisabStandard) -> Self {
        self.nisab_standard = Some(standard);
        self
    }

    pub fn zakat_rate(mut self, rate: impl IntoZakatDecimal) -> Self {
        self.zakat_rate = Some(non_negative("zakat_rate", rate));
        self
    }

    pub fn currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }
}

impl Validate for ZakatConfigBuilder {
    fn validate(&self) -> Result<(), ZakatError> {
        for slot in [&self.gold_price, &self.silver_price, &self.grams_per_tola, &self.zakat_rate] {
            if let Some(Err(ZakatError::InvalidInput { field, reason })) = slot {
                return Err(ZakatError::Configuration(format!("{} {}", field, reason)));
            }
        }
        Ok(())
    }
}

impl AssetBuilder<ZakatConfig> for ZakatConfigBuilder {
    fn build(self) -> Result<ZakatConfig, ZakatError> {
        self.validate()?;

        let defaults = ZakatConfig::default();
        let config = ZakatConfig {
            gold_price_per_gram: self.gold_price.transpose()?.unwrap_or(defaults.gold_price_per_gram),
            silver_price_per_gram: self.silver_price.transpose()?.unwrap_or(defaults.silver_price_per_gram),
            grams_per_tola: self.grams_per_tola.transpose()?.unwrap_or(defaults.grams_per_tola),
            nisab_policy: self.nisab_policy.unwrap_or(defaults.nisab_policy),
            nisab_standard: self.nisab_standard.unwrap_or(defaults.nisab_standard),
            zakat_rate: self.zakat_rate.transpose()?.unwrap_or(defaults.zakat_rate),
            currency_code: self.currency_code.unwrap_or(defaults.currency_code.clone()),
            ..defaults
        };

        config.validate()?;
        Ok(config)
    }
}
