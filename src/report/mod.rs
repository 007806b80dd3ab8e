//! Presentation of a [`ZakatReport`].
//!
//! Every surface (terminal listing, chart, exported document) takes its figures
//! from [`breakdown_lines`], so the numbers shown and the numbers exported for
//! one set of inputs are the same values.

pub mod chart;
pub mod export;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::{format_currency, format_tola};
use crate::types::{WealthType, ZakatReport};

pub const REPORT_TITLE: &str = "Zakat Calculation Report";
pub const OBLIGATED_MESSAGE: &str = "Give Zakat to those in need. May Allah bless you!";
pub const EXEMPT_MESSAGE: &str = "Your wealth is below the Nisab threshold. No Zakat is due.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Category(WealthType),
    TotalWealth,
    ZakatPayable,
}

/// One labelled figure of the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownLine {
    pub kind: LineKind,
    pub label: String,
    pub value: Decimal,
    pub formatted: String,
}

impl BreakdownLine {
    fn new(kind: LineKind, label: String, value: Decimal, currency_code: &str) -> Self {
        Self {
            kind,
            label,
            value,
            formatted: format_currency(value, currency_code),
        }
    }
}

impl std::fmt::Display for BreakdownLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.formatted)
    }
}

/// Gold, silver, cash and other assets, followed by the total and the payable amount.
pub fn breakdown_lines(report: &ZakatReport) -> Vec<BreakdownLine> {
    let code = report.currency_code.as_str();
    let b = &report.breakdown;

    vec![
        BreakdownLine::new(
            LineKind::Category(WealthType::Gold),
            format!("Gold ({} Tola)", format_tola(b.gold_tola)),
            b.gold_value,
            code,
        ),
        BreakdownLine::new(
            LineKind::Category(WealthType::Silver),
            format!("Silver ({} Tola)", format_tola(b.silver_tola)),
            b.silver_value,
            code,
        ),
        BreakdownLine::new(LineKind::Category(WealthType::Cash), "Cash".to_string(), b.cash_value, code),
        BreakdownLine::new(
            LineKind::Category(WealthType::OtherAssets),
            "Other Assets".to_string(),
            b.other_value,
            code,
        ),
        BreakdownLine::new(LineKind::TotalWealth, "Total Wealth".to_string(), b.total_wealth, code),
        BreakdownLine::new(LineKind::ZakatPayable, "Zakat Payable".to_string(), report.result.payable, code),
    ]
}

pub fn obligation_message(report: &ZakatReport) -> &'static str {
    if report.is_obligated() {
        OBLIGATED_MESSAGE
    } else {
        EXEMPT_MESSAGE
    }
}

/// Nisab threshold as shown to the user, or a description of the unit rule.
pub fn nisab_summary(report: &ZakatReport) -> String {
    match report.evaluation.threshold {
        Some(threshold) => format_currency(threshold, &report.currency_code),
        None => report
            .evaluation
            .unit_checks
            .iter()
            .map(|c| {
                if c.wealth_type.is_metal() {
                    format!("{} >= {} tola", c.wealth_type, format_tola(c.minimum))
                } else {
                    format!("{} >= {}", c.wealth_type, format_currency(c.minimum, &report.currency_code))
                }
            })
            .collect::<Vec<_>>()
            .join(" or "),
    }
}

/// The static text document: title, blank line, the breakdown lines.
pub fn render_text(report: &ZakatReport) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n");
    for line in breakdown_lines(report) {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}
