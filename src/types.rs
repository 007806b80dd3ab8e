use std::path::PathBuf;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::inputs::AssetInput;
use crate::policy::NisabEvaluation;
use crate::valuation::WealthBreakdown;

/// The kind of operation a [`CalculationStep`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initial,
    Add,
    Multiply,
    Compare,
    Rate,
    Result,
    Info,
}

impl Operation {
    fn symbol(&self) -> &'static str {
        match self {
            Operation::Initial => " ",
            Operation::Add => "+",
            Operation::Multiply => "x",
            Operation::Compare => "?",
            Operation::Rate => "x",
            Operation::Result => "=",
            Operation::Info => " ",
        }
    }
}

/// Represents a single step in the Zakat calculation process.
///
/// The trace lets a user verify how the payable amount was reached without
/// re-deriving it by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The value at this step (if applicable).
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn with(description: impl Into<String>, amount: Option<Decimal>, operation: Operation) -> Self {
        Self {
            description: description.into(),
            amount,
            operation,
        }
    }

    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Initial)
    }

    pub fn add(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Add)
    }

    pub fn multiply(description: impl Into<String>, factor: Decimal) -> Self {
        Self::with(description, Some(factor), Operation::Multiply)
    }

    pub fn compare(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Compare)
    }

    pub fn rate(description: impl Into<String>, rate: Decimal) -> Self {
        Self::with(description, Some(rate), Operation::Rate)
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Result)
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::with(description, None, Operation::Info)
    }
}

/// Outcome of the obligation decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ZakatResult {
    /// Amount due. Exactly zero when `is_obligated` is false.
    pub payable: Decimal,
    pub is_obligated: bool,
}

impl ZakatResult {
    pub fn exempt() -> Self {
        Self {
            payable: Decimal::ZERO,
            is_obligated: false,
        }
    }
}

/// Everything one computation produces.
///
/// A report is built once per set of inputs and then handed, unchanged, to the
/// on-screen listing, the chart sink and the exporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ZakatReport {
    pub input: AssetInput,
    pub breakdown: WealthBreakdown,
    pub evaluation: NisabEvaluation,
    pub result: ZakatResult,
    /// Rate applied to total wealth when obligated.
    pub rate: Decimal,
    /// Currency code used for display, e.g. `PKR`.
    pub currency_code: String,
    pub calculation_trace: Vec<CalculationStep>,
}

impl ZakatReport {
    pub fn total_wealth(&self) -> Decimal {
        self.breakdown.total_wealth
    }

    pub fn payable(&self) -> Decimal {
        self.result.payable
    }

    pub fn is_obligated(&self) -> bool {
        self.result.is_obligated
    }

    /// Returns the payable amount formatted for display.
    pub fn format_amount(&self) -> String {
        crate::format::format_currency(self.result.payable, &self.currency_code)
    }

    /// Generates a human-readable explanation of the calculation trace.
    pub fn explain(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        let _ = writeln!(output, "Explanation ({}):", self.evaluation.policy);
        let _ = writeln!(output, "{:-<50}", "");

        let width = self
            .calculation_trace
            .iter()
            .map(|step| step.description.len())
            .max()
            .unwrap_or(20)
            .max(20);

        for step in &self.calculation_trace {
            match (step.operation, step.amount) {
                (Operation::Info, _) | (_, None) => {
                    let _ = writeln!(output, "  INFO: {}", step.description);
                }
                (Operation::Rate, Some(amount)) | (Operation::Multiply, Some(amount)) => {
                    let _ = writeln!(
                        output,
                        "  {:<width$} : {} {:>18}",
                        step.description,
                        step.operation.symbol(),
                        amount.normalize(),
                        width = width
                    );
                }
                (op, Some(amount)) => {
                    let _ = writeln!(
                        output,
                        "  {:<width$} : {} {:>18.2}",
                        step.description,
                        op.symbol(),
                        amount,
                        width = width
                    );
                }
            }
        }

        let _ = writeln!(output, "{:-<50}", "");
        if self.is_obligated() {
            let _ = writeln!(output, "Status: PAYABLE");
            let _ = writeln!(output, "Amount Due: {}", self.format_amount());
        } else {
            let _ = writeln!(output, "Status: EXEMPT");
            let _ = writeln!(output, "Reason: {}", self.evaluation.reason);
        }

        output
    }
}

impl std::fmt::Display for ZakatReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total = crate::format::format_currency(self.total_wealth(), &self.currency_code);
        writeln!(f, "Total Wealth: {} | Policy: {}", total, self.evaluation.policy)?;
        if self.is_obligated() {
            write!(f, "Status: PAYABLE ({} due)", self.format_amount())
        } else {
            write!(f, "Status: EXEMPT - {}", self.evaluation.reason)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ZakatError {
    #[error("Invalid input [{field}]: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing configuration: field '{field}' is required")]
    MissingConfig { field: String },

    #[error("Arithmetic overflow: operation '{operation}' failed")]
    Overflow { operation: String },

    #[error("Failed to export report to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

impl ZakatError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ZakatError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn overflow(operation: impl Into<String>) -> Self {
        ZakatError::Overflow {
            operation: operation.into(),
        }
    }

    /// Returns true for failures that leave previously computed results intact
    /// and can be retried by the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ZakatError::Export { .. } | ZakatError::Chart(_))
    }
}

/// The four wealth categories a user declares.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumIter, JsonSchema)]
pub enum WealthType {
    #[strum(to_string = "Cash")]
    Cash,
    #[strum(to_string = "Gold")]
    Gold,
    #[strum(to_string = "Silver")]
    Silver,
    #[strum(to_string = "Other Assets")]
    OtherAssets,
}

impl WealthType {
    /// Gold and silver are declared by weight in tola; the rest in currency.
    pub fn is_metal(&self) -> bool {
        matches!(self, WealthType::Gold | WealthType::Silver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_wealth_type_labels() {
        let labels: Vec<String> = WealthType::iter().map(|w| w.to_string()).collect();
        assert_eq!(labels, vec!["Cash", "Gold", "Silver", "Other Assets"]);
        assert!(WealthType::Gold.is_metal());
        assert!(!WealthType::OtherAssets.is_metal());
    }

    #[test]
    fn test_export_error_is_recoverable() {
        let err = ZakatError::Export {
            path: PathBuf::from("/nowhere/report.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("/nowhere/report.txt"));
        assert!(!ZakatError::overflow("total").is_recoverable());
    }

    #[test]
    fn test_trace_operation_serializes_camel_case() {
        let step = CalculationStep::rate("Applied Rate", rust_decimal_macros::dec!(0.025));
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains(r#""operation":"rate""#));
    }
}
