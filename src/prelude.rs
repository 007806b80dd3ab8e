//! Prelude module for zakat-calc
//!
//! Re-exports the types needed for a typical calculation.
//!
//! # Usage
//!
//! ```rust
//! use zakat_calc::prelude::*;
//! ```

// Core exports
pub use crate::builder::AssetBuilder;
pub use crate::config::ZakatConfig;
pub use crate::inputs::{AssetInput, IntoZakatDecimal};
pub use crate::policy::{NisabEvaluation, NisabPolicy, NisabStandard};
pub use crate::pricing::{PriceProvider, Prices, StaticPriceProvider};
pub use crate::traits::{CalculateZakat, calculate};
pub use crate::types::{CalculationStep, WealthType, ZakatError, ZakatReport, ZakatResult};
pub use crate::valuation::WealthBreakdown;

// Presentation ports
pub use crate::format::{CurrencyFormatter, format_currency};
pub use crate::report::chart::{ChartSink, ChartSlice, TextChart, render_chart};
pub use crate::report::export::{ExportFormat, FileExporter, ReportExporter};
pub use crate::report::{BreakdownLine, breakdown_lines, obligation_message};
