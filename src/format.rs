//! Display formatting for currency amounts.
//!
//! Amounts are rounded to two places only here, then grouped with thousands
//! separators through ICU4X, giving `PKR 1,982,880.00`.

use fixed_decimal::FixedDecimal;
use icu::decimal::{FixedDecimalFormatter, options::FixedDecimalFormatterOptions};
use icu::locid::locale;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use writeable::Writeable;

/// Trait for formatting amounts for display.
pub trait CurrencyFormatter {
    fn format_currency(&self, amount: Decimal) -> String;
}

/// Formats amounts as `<code> #,###.##`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCurrency {
    pub currency_code: String,
}

impl GroupedCurrency {
    pub fn new(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
        }
    }
}

impl CurrencyFormatter for GroupedCurrency {
    fn format_currency(&self, amount: Decimal) -> String {
        format!("{} {}", self.currency_code, format_grouped(amount))
    }
}

/// Rounds half away from zero to exactly two places.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `1982880` → `1,982,880.00`
pub fn format_grouped(amount: Decimal) -> String {
    let plain = format!("{:.2}", round_for_display(amount));

    let Ok(fixed) = FixedDecimal::from_str(&plain) else {
        return plain;
    };

    let options = FixedDecimalFormatterOptions::default();
    match FixedDecimalFormatter::try_new(&locale!("en").into(), options) {
        Ok(formatter) => formatter.format(&fixed).write_to_string().into_owned(),
        Err(e) => {
            tracing::warn!("ICU decimal formatter unavailable, using ungrouped output: {}", e);
            plain
        }
    }
}

pub fn format_currency(amount: Decimal, currency_code: &str) -> String {
    GroupedCurrency::new(currency_code).format_currency(amount)
}

/// Tola counts are shown as entered, without trailing zeros.
pub fn format_tola(tola: Decimal) -> String {
    tola.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_formatting() {
        assert_eq!(format_currency(dec!(1982880), "PKR"), "PKR 1,982,880.00");
        assert_eq!(format_currency(dec!(49572), "PKR"), "PKR 49,572.00");
        assert_eq!(format_currency(dec!(0), "PKR"), "PKR 0.00");
        assert_eq!(format_currency(dec!(999.5), "PKR"), "PKR 999.50");
    }

    #[test]
    fn test_rounding_is_display_only() {
        assert_eq!(format_grouped(dec!(1234.565)), "1,234.57");
        assert_eq!(format_grouped(dec!(0.004)), "0.00");
        assert_eq!(round_for_display(dec!(2.675)), dec!(2.68));
    }

    #[test]
    fn test_tola_formatting() {
        assert_eq!(format_tola(dec!(10.00)), "10");
        assert_eq!(format_tola(dec!(7.50)), "7.5");
    }
}
