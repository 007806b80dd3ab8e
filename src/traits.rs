use rust_decimal::Decimal;

use crate::config::ZakatConfig;
use crate::inputs::AssetInput;
use crate::types::{CalculationStep, ZakatError, ZakatReport, ZakatResult};
use crate::valuation::WealthBreakdown;

/// Trait to be implemented by anything that can produce a Zakat report.
pub trait CalculateZakat {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatReport, ZakatError>;
}

impl CalculateZakat for AssetInput {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatReport, ZakatError> {
        config.validate()?;
        self.validate()?;

        let mut trace = Vec::new();
        let breakdown = WealthBreakdown::compute_traced(self, config, &mut trace)?;

        let evaluation = config
            .nisab_policy
            .strategy(config.nisab_standard)
            .evaluate(self, &breakdown, config, &mut trace)?;

        let result = if evaluation.is_obligated {
            trace.push(CalculationStep::rate("Applied Rate", config.zakat_rate));
            let payable = breakdown
                .total_wealth
                .checked_mul(config.zakat_rate)
                .ok_or_else(|| ZakatError::overflow("zakat payable"))?;
            trace.push(CalculationStep::result("Zakat Payable", payable));
            ZakatResult { payable, is_obligated: true }
        } else {
            trace.push(CalculationStep::info(format!("{} - No Zakat Due", evaluation.reason)));
            ZakatResult::exempt()
        };

        tracing::debug!(
            policy = %evaluation.policy,
            total = %breakdown.total_wealth,
            obligated = result.is_obligated,
            payable = %result.payable,
            "zakat calculated"
        );

        Ok(ZakatReport {
            input: *self,
            breakdown,
            evaluation,
            result,
            rate: config.zakat_rate,
            currency_code: config.currency_code.clone(),
            calculation_trace: trace,
        })
    }
}

/// Convenience wrapper over [`CalculateZakat`] for the four raw figures.
pub fn calculate(
    cash: impl crate::inputs::IntoZakatDecimal,
    gold_tola: impl crate::inputs::IntoZakatDecimal,
    silver_tola: impl crate::inputs::IntoZakatDecimal,
    other_assets: impl crate::inputs::IntoZakatDecimal,
    config: &ZakatConfig,
) -> Result<ZakatReport, ZakatError> {
    AssetInput::new(cash, gold_tola, silver_tola, other_assets)?.calculate_zakat(config)
}

/// Payable is always exactly zero or exactly `total × rate`.
pub fn is_consistent(report: &ZakatReport) -> bool {
    if report.result.is_obligated {
        report.result.payable == report.breakdown.total_wealth * report.rate
    } else {
        report.result.payable == Decimal::ZERO
    }
}
