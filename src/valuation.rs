//! Tola to gram conversion and valuation of declared holdings.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::inputs::AssetInput;
use crate::types::{CalculationStep, WealthType, ZakatError};

pub fn tola_to_grams(tola: Decimal, grams_per_tola: Decimal) -> Result<Decimal, ZakatError> {
    tola.checked_mul(grams_per_tola)
        .ok_or_else(|| ZakatError::overflow("tola to grams conversion"))
}

pub fn metal_value(grams: Decimal, price_per_gram: Decimal) -> Result<Decimal, ZakatError> {
    grams
        .checked_mul(price_per_gram)
        .ok_or_else(|| ZakatError::overflow("metal value"))
}

/// Currency value of every declared category plus their exact sum.
///
/// Nothing here is rounded; rounding happens only when a figure is formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WealthBreakdown {
    pub gold_tola: Decimal,
    pub silver_tola: Decimal,
    pub gold_grams: Decimal,
    pub silver_grams: Decimal,
    pub gold_value: Decimal,
    pub silver_value: Decimal,
    pub cash_value: Decimal,
    pub other_value: Decimal,
    pub total_wealth: Decimal,
}

impl WealthBreakdown {
    pub fn compute(input: &AssetInput, config: &ZakatConfig) -> Result<Self, ZakatError> {
        Self::compute_traced(input, config, &mut Vec::new())
    }

    pub(crate) fn compute_traced(
        input: &AssetInput,
        config: &ZakatConfig,
        trace: &mut Vec<CalculationStep>,
    ) -> Result<Self, ZakatError> {
        let gold_grams = tola_to_grams(input.gold_tola, config.grams_per_tola)?;
        let silver_grams = tola_to_grams(input.silver_tola, config.grams_per_tola)?;
        let gold_value = metal_value(gold_grams, config.gold_price_per_gram)?;
        let silver_value = metal_value(silver_grams, config.silver_price_per_gram)?;

        trace.push(CalculationStep::initial("Gold (tola)", input.gold_tola));
        trace.push(CalculationStep::multiply("Grams per tola", config.grams_per_tola));
        trace.push(CalculationStep::multiply("Gold price per gram", config.gold_price_per_gram));
        trace.push(CalculationStep::result("Gold Value", gold_value));
        trace.push(CalculationStep::initial("Silver (tola)", input.silver_tola));
        trace.push(CalculationStep::multiply("Grams per tola", config.grams_per_tola));
        trace.push(CalculationStep::multiply("Silver price per gram", config.silver_price_per_gram));
        trace.push(CalculationStep::result("Silver Value", silver_value));

        let total_wealth = [gold_value, silver_value, input.cash, input.other_assets]
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
            .ok_or_else(|| ZakatError::overflow("total wealth"))?;

        trace.push(CalculationStep::initial("Gold Value", gold_value));
        trace.push(CalculationStep::add("Silver Value", silver_value));
        trace.push(CalculationStep::add("Cash", input.cash));
        trace.push(CalculationStep::add("Other Assets", input.other_assets));
        trace.push(CalculationStep::result("Total Wealth", total_wealth));

        tracing::debug!(%gold_value, %silver_value, %total_wealth, "valued holdings");

        Ok(Self {
            gold_tola: input.gold_tola,
            silver_tola: input.silver_tola,
            gold_grams,
            silver_grams,
            gold_value,
            silver_value,
            cash_value: input.cash,
            other_value: input.other_assets,
            total_wealth,
        })
    }

    pub fn value_of(&self, wealth_type: WealthType) -> Decimal {
        match wealth_type {
            WealthType::Cash => self.cash_value,
            WealthType::Gold => self.gold_value,
            WealthType::Silver => self.silver_value,
            WealthType::OtherAssets => self.other_value,
        }
    }
}
