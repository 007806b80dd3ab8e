//! Chart output port.
//!
//! The engine hands a chart sink plain `(label, value)` slices; how they are
//! drawn is the sink's business. [`proportions`] is the helper sinks use to turn
//! values into shares without dividing by a zero total.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::types::{WealthType, ZakatError, ZakatReport};
use crate::valuation::WealthBreakdown;

pub const CHART_TITLE: &str = "Wealth Distribution";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: Decimal,
}

/// Slices in the order Cash, Gold, Silver, Other Assets. Zero slices are kept.
pub fn chart_data(breakdown: &WealthBreakdown) -> Vec<ChartSlice> {
    [WealthType::Cash, WealthType::Gold, WealthType::Silver, WealthType::OtherAssets]
        .into_iter()
        .map(|w| ChartSlice {
            label: w.to_string(),
            value: breakdown.value_of(w),
        })
        .collect()
}

/// Share of each slice in `0.0..=1.0`; all zeros when the total is zero.
pub fn proportions(slices: &[ChartSlice]) -> Vec<f64> {
    let total: Decimal = slices.iter().map(|s| s.value).sum();
    if total <= Decimal::ZERO {
        return vec![0.0; slices.len()];
    }
    slices
        .iter()
        .map(|s| (s.value / total).to_f64().unwrap_or(0.0))
        .collect()
}

/// Something that draws the wealth distribution.
pub trait ChartSink {
    fn render(&mut self, title: &str, slices: &[ChartSlice]) -> Result<(), ZakatError>;
}

/// Forwards a report's breakdown to a chart sink.
pub fn render_chart(report: &ZakatReport, sink: &mut dyn ChartSink) -> Result<(), ZakatError> {
    let slices = chart_data(&report.breakdown);
    sink.render(CHART_TITLE, &slices)
}

/// Draws horizontal bars into a string, one line per slice.
#[derive(Debug, Clone)]
pub struct TextChart {
    pub width: usize,
    pub output: String,
}

impl Default for TextChart {
    fn default() -> Self {
        Self {
            width: 40,
            output: String::new(),
        }
    }
}

impl TextChart {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }
}

impl ChartSink for TextChart {
    fn render(&mut self, title: &str, slices: &[ChartSlice]) -> Result<(), ZakatError> {
        use std::fmt::Write;

        let label_width = slices.iter().map(|s| s.label.len()).max().unwrap_or(0);
        let shares = proportions(slices);

        self.output.clear();
        writeln!(self.output, "{}", title).map_err(|e| ZakatError::Chart(e.to_string()))?;
        for (slice, share) in slices.iter().zip(shares) {
            let filled = (share * self.width as f64).round() as usize;
            writeln!(
                self.output,
                "{:<label_width$} |{:<bar_width$}| {:>5.1}%",
                slice.label,
                "#".repeat(filled.min(self.width)),
                share * 100.0,
                label_width = label_width,
                bar_width = self.width
            )
            .map_err(|e| ZakatError::Chart(e.to_string()))?;
        }
        Ok(())
    }
}
