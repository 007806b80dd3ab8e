//! Nisab policies.
//!
//! Two rules for deciding whether Zakat is due are in circulation for this
//! calculator, and they disagree on mixed portfolios:
//!
//! - [`NisabPolicy::ValueBased`] compares *total* wealth against a currency
//!   threshold derived from the metal prices (the classical rule, default).
//! - [`NisabPolicy::UnitThreshold`] triggers when any one holding reaches its own
//!   minimum (7.5 tola gold, 52.5 tola silver, or a fixed cash floor). Other
//!   assets never take part in this check even though they are included in the
//!   payable amount.
//!
//! Both are exposed as strategies so a caller picks one explicitly.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::config::ZakatConfig;
use crate::inputs::AssetInput;
use crate::types::{CalculationStep, WealthType, ZakatError};
use crate::valuation::WealthBreakdown;

/// Which metal equivalent sets the value-based threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NisabStandard {
    /// `nisab_gold_grams × gold price`
    Gold,
    /// `nisab_silver_grams × silver price`
    Silver,
    /// The lower of the two, which is most beneficial for the poor.
    #[default]
    LowerOfTwo,
}

/// The rule used to decide whether Zakat is obligatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NisabPolicy {
    #[default]
    ValueBased,
    UnitThreshold,
}

impl NisabPolicy {
    pub fn strategy(&self, standard: NisabStandard) -> Box<dyn NisabStrategy> {
        match self {
            NisabPolicy::ValueBased => Box::new(ValueBasedStrategy { standard }),
            NisabPolicy::UnitThreshold => Box::new(UnitThresholdStrategy),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            NisabPolicy::ValueBased => "Value-based Nisab (total wealth vs. metal-equivalent threshold)",
            NisabPolicy::UnitThreshold => "Unit-based Nisab (gold tola, silver tola or cash floor)",
        }
    }
}

/// One per-holding check made by the unit policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UnitCheck {
    pub wealth_type: WealthType,
    pub declared: Decimal,
    pub minimum: Decimal,
    pub met: bool,
}

/// The obligation decision together with what it was based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NisabEvaluation {
    pub policy: NisabPolicy,
    /// Currency threshold, present for the value-based policy only.
    pub threshold: Option<Decimal>,
    /// Per-holding checks, present for the unit policy only.
    pub unit_checks: Vec<UnitCheck>,
    pub is_obligated: bool,
    /// How far total wealth is towards the threshold, in `0.0..=1.0`.
    pub nisab_progress: f64,
    pub reason: String,
}

/// A rule that decides whether declared wealth triggers an obligation.
pub trait NisabStrategy {
    fn policy(&self) -> NisabPolicy;

    /// Evaluates the rule and appends the steps it took to `trace`.
    fn evaluate(
        &self,
        input: &AssetInput,
        breakdown: &WealthBreakdown,
        config: &ZakatConfig,
        trace: &mut Vec<CalculationStep>,
    ) -> Result<NisabEvaluation, ZakatError>;
}

pub struct ValueBasedStrategy {
    pub standard: NisabStandard,
}

impl NisabStrategy for ValueBasedStrategy {
    fn policy(&self) -> NisabPolicy {
        NisabPolicy::ValueBased
    }

    fn evaluate(
        &self,
        _input: &AssetInput,
        breakdown: &WealthBreakdown,
        config: &ZakatConfig,
        trace: &mut Vec<CalculationStep>,
    ) -> Result<NisabEvaluation, ZakatError> {
        let threshold = config.monetary_nisab_threshold(self.standard)?;
        let total = breakdown.total_wealth;

        trace.push(CalculationStep::compare(
            format!("Nisab Threshold ({})", self.standard),
            threshold,
        ));

        // Zero wealth is never obligated, even when a zero price makes the threshold zero.
        let is_obligated = total >= threshold && total > Decimal::ZERO;

        let nisab_progress = if total <= Decimal::ZERO {
            0.0
        } else if threshold <= Decimal::ZERO || total >= threshold {
            1.0
        } else {
            (total / threshold).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
        };

        let reason = if total <= Decimal::ZERO {
            "No wealth declared".to_string()
        } else if is_obligated {
            "Total wealth meets the Nisab threshold".to_string()
        } else {
            "Your wealth is below the Nisab threshold".to_string()
        };

        Ok(NisabEvaluation {
            policy: self.policy(),
            threshold: Some(threshold),
            unit_checks: Vec::new(),
            is_obligated,
            nisab_progress,
            reason,
        })
    }
}

pub struct UnitThresholdStrategy;

impl NisabStrategy for UnitThresholdStrategy {
    fn policy(&self) -> NisabPolicy {
        NisabPolicy::UnitThreshold
    }

    fn evaluate(
        &self,
        input: &AssetInput,
        breakdown: &WealthBreakdown,
        config: &ZakatConfig,
        trace: &mut Vec<CalculationStep>,
    ) -> Result<NisabEvaluation, ZakatError> {
        let unit_checks: Vec<UnitCheck> = [
            (WealthType::Gold, config.gold_tola_threshold),
            (WealthType::Silver, config.silver_tola_threshold),
            (WealthType::Cash, config.cash_threshold),
        ]
        .into_iter()
        .map(|(wealth_type, minimum)| {
            let declared = input.declared(wealth_type);
            UnitCheck {
                wealth_type,
                declared,
                minimum,
                met: declared >= minimum,
            }
        })
        .collect();

        for check in &unit_checks {
            let unit = if check.wealth_type.is_metal() { " tola" } else { "" };
            trace.push(CalculationStep::compare(
                format!("{} minimum{} ({})", check.wealth_type, unit, if check.met { "met" } else { "not met" }),
                check.minimum,
            ));
        }
        trace.push(CalculationStep::info("Other assets are not part of the unit threshold check"));

        let met: Vec<String> = unit_checks
            .iter()
            .filter(|c| c.met)
            .map(|c| c.wealth_type.to_string())
            .collect();
        // Zero wealth never owes, even with zero minimums.
        let has_wealth = breakdown.total_wealth > Decimal::ZERO;
        let is_obligated = has_wealth && !met.is_empty();

        let reason = if !has_wealth {
            "No wealth declared".to_string()
        } else if is_obligated {
            format!("Unit threshold met: {}", met.join(", "))
        } else {
            "No holding reaches its unit threshold".to_string()
        };

        Ok(NisabEvaluation {
            policy: self.policy(),
            threshold: None,
            unit_checks,
            is_obligated,
            nisab_progress: if is_obligated { 1.0 } else { 0.0 },
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn evaluate(policy: NisabPolicy, input: AssetInput) -> NisabEvaluation {
        let config = ZakatConfig::default().with_nisab_policy(policy);
        let breakdown = WealthBreakdown::compute(&input, &config).unwrap();
        let mut trace = Vec::new();
        policy
            .strategy(config.nisab_standard)
            .evaluate(&input, &breakdown, &config, &mut trace)
            .unwrap()
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(NisabPolicy::from_str("unit-threshold").unwrap(), NisabPolicy::UnitThreshold);
        assert_eq!(NisabStandard::from_str("lower-of-two").unwrap(), NisabStandard::LowerOfTwo);
        assert_eq!(NisabPolicy::ValueBased.to_string(), "value-based");
    }

    #[test]
    fn test_value_based_progress() {
        // 61,236 is half of the default silver nisab (612.36 g x 200).
        let eval = evaluate(NisabPolicy::ValueBased, AssetInput::new(dec!(61236), 0, 0, 0).unwrap());
        assert!(!eval.is_obligated);
        assert_eq!(eval.threshold, Some(dec!(122472)));
        assert!((eval.nisab_progress - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unit_threshold_gold_boundary() {
        let eval = evaluate(NisabPolicy::UnitThreshold, AssetInput::new(0, dec!(7.5), 0, 0).unwrap());
        assert!(eval.is_obligated);
        assert_eq!(eval.threshold, None);
        assert!(eval.reason.contains("Gold"));

        let eval = evaluate(NisabPolicy::UnitThreshold, AssetInput::new(0, dec!(7.49), 0, 0).unwrap());
        assert!(!eval.is_obligated);
    }

    #[test]
    fn test_unit_threshold_zero_minimums_with_no_wealth() {
        let config = ZakatConfig {
            nisab_policy: NisabPolicy::UnitThreshold,
            gold_tola_threshold: Decimal::ZERO,
            silver_tola_threshold: Decimal::ZERO,
            cash_threshold: Decimal::ZERO,
            ..Default::default()
        };
        let input = AssetInput::default();
        let breakdown = WealthBreakdown::compute(&input, &config).unwrap();
        let eval = UnitThresholdStrategy
            .evaluate(&input, &breakdown, &config, &mut Vec::new())
            .unwrap();

        assert!(!eval.is_obligated);
        assert_eq!(eval.reason, "No wealth declared");
        assert_eq!(eval.nisab_progress, 0.0);
    }

    #[test]
    fn test_unit_threshold_ignores_other_assets() {
        let eval = evaluate(NisabPolicy::UnitThreshold, AssetInput::new(0, 0, 0, dec!(10000000)).unwrap());
        assert!(!eval.is_obligated);
        assert_eq!(eval.unit_checks.len(), 3);
    }
}
