//! # zakat-calc
//!
//! Computes Zakat on cash, gold and silver (declared in tola) and other assets.
//!
//! ```rust
//! use zakat_calc::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let config = ZakatConfig::default(); // 17,000 PKR/g gold, 200 PKR/g silver
//! let input = AssetInput::new(0, 10, 0, 0).unwrap();
//! let report = input.calculate_zakat(&config).unwrap();
//!
//! assert!(report.is_obligated());
//! assert_eq!(report.payable(), dec!(49572));
//! ```

pub mod builder;
pub mod config;
pub mod format;
pub mod inputs;
pub mod policy;
pub mod prelude;
pub mod pricing;
pub mod report;
pub mod traits;
pub mod types;
pub mod valuation;

pub use config::ZakatConfig;
pub use inputs::AssetInput;
pub use policy::{NisabPolicy, NisabStandard};
pub use traits::CalculateZakat;
pub use types::{WealthType, ZakatError, ZakatReport, ZakatResult};
