use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::builder::{AssetBuilder, Validate};
use crate::types::{WealthType, ZakatError};

/// Trait for converting various types into `Decimal` for Zakat calculations.
///
/// This trait allows users to pass `i32`, `f64`, `&str`, etc. directly into
/// constructors without needing to wrap them in `dec!()` or `Decimal::from()`.
pub trait IntoZakatDecimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError>;
}

impl IntoZakatDecimal for Decimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Ok(self)
    }
}

macro_rules! impl_into_zakat_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_int!(i32, u32, i64, u64, isize, usize);

macro_rules! impl_into_zakat_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    // Going through the shortest string form keeps 11.664 as 11.664
                    // instead of its binary expansion.
                    Decimal::from_str(&self.to_string())
                        .or_else(|_| Decimal::from_scientific(&format!("{:e}", self)))
                        .map_err(|_| ZakatError::invalid_input("value", format!("Invalid float value: {}", self)))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_float!(f32, f64);

impl IntoZakatDecimal for &str {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Decimal::from_str(self.trim())
            .map_err(|e| ZakatError::invalid_input("value", format!("Invalid number '{}': {}", self, e)))
    }
}

impl IntoZakatDecimal for String {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        self.as_str().into_zakat_decimal()
    }
}

/// Converts and rejects negative values, naming the offending field.
pub(crate) fn non_negative(field: &str, value: impl IntoZakatDecimal) -> Result<Decimal, ZakatError> {
    let value = value.into_zakat_decimal().map_err(|e| match e {
        ZakatError::InvalidInput { reason, .. } => ZakatError::invalid_input(field, reason),
        other => other,
    })?;
    if value.is_sign_negative() && !value.is_zero() {
        tracing::warn!(field, %value, "rejected negative input");
        return Err(ZakatError::invalid_input(field, "must be non-negative"));
    }
    Ok(value)
}

/// The four figures a user declares.
///
/// Gold and silver are weights in tola; cash and other assets are currency
/// amounts. Every field is non-negative once constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AssetInput {
    pub cash: Decimal,
    pub gold_tola: Decimal,
    pub silver_tola: Decimal,
    pub other_assets: Decimal,
}

impl AssetInput {
    pub fn new(
        cash: impl IntoZakatDecimal,
        gold_tola: impl IntoZakatDecimal,
        silver_tola: impl IntoZakatDecimal,
        other_assets: impl IntoZakatDecimal,
    ) -> Result<Self, ZakatError> {
        let input = Self {
            cash: non_negative("cash", cash)?,
            gold_tola: non_negative("gold_tola", gold_tola)?,
            silver_tola: non_negative("silver_tola", silver_tola)?,
            other_assets: non_negative("other_assets", other_assets)?,
        };
        Ok(input)
    }

    pub fn builder() -> AssetInputBuilder {
        AssetInputBuilder::default()
    }

    /// Re-checks the invariants, e.g. after deserializing from JSON.
    pub fn validate(&self) -> Result<(), ZakatError> {
        for (field, value) in [
            ("cash", self.cash),
            ("gold_tola", self.gold_tola),
            ("silver_tola", self.silver_tola),
            ("other_assets", self.other_assets),
        ] {
            non_negative(field, value)?;
        }
        Ok(())
    }

    /// The declared figure for a category, in tola for metals and currency otherwise.
    pub fn declared(&self, wealth_type: WealthType) -> Decimal {
        match wealth_type {
            WealthType::Cash => self.cash,
            WealthType::Gold => self.gold_tola,
            WealthType::Silver => self.silver_tola,
            WealthType::OtherAssets => self.other_assets,
        }
    }
}

/// Builder for [`AssetInput`]. Unset fields default to zero.
#[derive(Default)]
pub struct AssetInputBuilder {
    cash: Option<Result<Decimal, ZakatError>>,
    gold_tola: Option<Result<Decimal, ZakatError>>,
    silver_tola: Option<Result<Decimal, ZakatError>>,
    other_assets: Option<Result<Decimal, ZakatError>>,
}

impl AssetInputBuilder {
    pub fn cash(mut self, amount: impl IntoZakatDecimal) -> Self {
        self.cash = Some(non_negative("cash", amount));
        self
    }

    pub fn gold_tola(mut self, tola: impl IntoZakatDecimal) -> Self {
        self.gold_tola = Some(non_negative("gold_tola", tola));
        self
    }

    pub fn silver_tola(mut self, tola: impl IntoZakatDecimal) -> Self {
        self.silver_tola = Some(non_negative("silver_tola", tola));
        self
    }

    pub fn other_assets(mut self, amount: impl IntoZakatDecimal) -> Self {
        self.other_assets = Some(non_negative("other_assets", amount));
        self
    }

    fn take(slot: Option<Result<Decimal, ZakatError>>) -> Result<Decimal, ZakatError> {
        slot.unwrap_or(Ok(Decimal::ZERO))
    }
}

impl Validate for AssetInputBuilder {
    fn validate(&self) -> Result<(), ZakatError> {
        for slot in [&self.cash, &self.gold_tola, &self.silver_tola, &self.other_assets] {
            if let Some(Err(ZakatError::InvalidInput { field, reason })) = slot {
                return Err(ZakatError::invalid_input(field.clone(), reason.clone()));
            }
        }
        Ok(())
    }
}

impl AssetBuilder<AssetInput> for AssetInputBuilder {
    fn build(self) -> Result<AssetInput, ZakatError> {
        self.validate()?;
        Ok(AssetInput {
            cash: Self::take(self.cash)?,
            gold_tola: Self::take(self.gold_tola)?,
            silver_tola: Self::take(self.silver_tola)?,
            other_assets: Self::take(self.other_assets)?,
        })
    }
}
