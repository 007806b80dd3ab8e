//! Pricing module for Zakat calculations.
//!
//! Metal prices are plain data here. A [`PriceProvider`] is the seam where a
//! market-data source would plug in; the crate ships a static provider and an
//! environment-backed one.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;

use crate::inputs::{IntoZakatDecimal, non_negative};
use crate::types::ZakatError;

pub const GOLD_PRICE_ENV: &str = "ZAKAT_GOLD_PRICE";
pub const SILVER_PRICE_ENV: &str = "ZAKAT_SILVER_PRICE";

/// Current market prices for the metals, per gram in local currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Prices {
    pub gold_per_gram: Decimal,
    pub silver_per_gram: Decimal,
}

impl Prices {
    pub fn new(
        gold_per_gram: impl IntoZakatDecimal,
        silver_per_gram: impl IntoZakatDecimal,
    ) -> Result<Self, ZakatError> {
        Ok(Self {
            gold_per_gram: non_negative("gold_price_per_gram", gold_per_gram)?,
            silver_per_gram: non_negative("silver_price_per_gram", silver_per_gram)?,
        })
    }
}

/// Trait for fetching current metal prices.
pub trait PriceProvider {
    /// Returns `Err(ZakatError)` if prices cannot be obtained.
    fn get_prices(&self) -> Result<Prices, ZakatError>;
}

/// A static price provider for tests and user-supplied prices.
#[derive(Debug, Clone)]
pub struct StaticPriceProvider {
    prices: Prices,
}

impl StaticPriceProvider {
    pub fn new(
        gold_per_gram: impl IntoZakatDecimal,
        silver_per_gram: impl IntoZakatDecimal,
    ) -> Result<Self, ZakatError> {
        Ok(Self {
            prices: Prices::new(gold_per_gram, silver_per_gram)?,
        })
    }

    pub fn from_prices(prices: Prices) -> Self {
        Self { prices }
    }
}

impl PriceProvider for StaticPriceProvider {
    fn get_prices(&self) -> Result<Prices, ZakatError> {
        Ok(self.prices)
    }
}

/// Reads `ZAKAT_GOLD_PRICE` and `ZAKAT_SILVER_PRICE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvPriceProvider;

impl EnvPriceProvider {
    fn read(name: &str) -> Result<Decimal, ZakatError> {
        let raw = env::var(name)
            .map_err(|_| ZakatError::Configuration(format!("{} env var not set", name)))?;
        raw.parse::<Decimal>()
            .map_err(|e| ZakatError::Configuration(format!("Invalid {} format: {}", name, e)))
    }
}

impl PriceProvider for EnvPriceProvider {
    fn get_prices(&self) -> Result<Prices, ZakatError> {
        Prices::new(Self::read(GOLD_PRICE_ENV)?, Self::read(SILVER_PRICE_ENV)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_prices_creation() {
        let prices = Prices::new(17000, 200).unwrap();
        assert_eq!(prices.gold_per_gram, dec!(17000));
        assert_eq!(prices.silver_per_gram, dec!(200));
    }

    #[test]
    fn test_prices_rejects_negative() {
        let result = Prices::new(-10, 1);
        assert!(matches!(
            result,
            Err(ZakatError::InvalidInput { ref field, .. }) if field == "gold_price_per_gram"
        ));
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticPriceProvider::new(100, 2).unwrap();
        let prices = provider.get_prices().unwrap();
        assert_eq!(prices.gold_per_gram, dec!(100));
        assert_eq!(prices.silver_per_gram, dec!(2));
    }
}
