use colored::Colorize;
use inquire::validator::{ErrorMessage, Validation};
use inquire::{Confirm, CustomType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use zakat_calc::prelude::*;

/// Asks for the four figures and builds the validated input.
pub fn run_wizard_mode(currency_code: &str) -> Result<AssetInput, Box<dyn std::error::Error>> {
    println!("\n{}", "📿 بسم الله الرحمن الرحيم".bright_blue().bold());
    println!("{}", "🕌 ZAKAT CALCULATOR - حساب الزكاة".bright_cyan().bold());
    println!("{}", "Calculate your Zakat and fulfill your obligation.".dimmed());
    println!("{}", "You can press Ctrl+C at any time to exit.".dimmed());
    println!();

    // Helper validator for non-negative Decimals
    let non_negative = |input: &Decimal| {
        if *input < Decimal::ZERO {
            Ok(Validation::Invalid(ErrorMessage::Custom("Value must be non-negative".to_string())))
        } else {
            Ok(Validation::Valid)
        }
    };

    let cash: Decimal = CustomType::new(&format!("💵 Cash in Hand ({}):", currency_code))
        .with_default(dec!(0))
        .with_error_message("Please enter a valid number")
        .with_validator(non_negative)
        .prompt()?;

    let gold_tola: Decimal = CustomType::new("🪙 Gold (Tola):")
        .with_default(dec!(0))
        .with_help_message("1 tola = 11.664 grams")
        .with_error_message("Please enter a valid number")
        .with_validator(non_negative)
        .prompt()?;

    let silver_tola: Decimal = CustomType::new("🔗 Silver (Tola):")
        .with_default(dec!(0))
        .with_help_message("1 tola = 11.664 grams")
        .with_error_message("Please enter a valid number")
        .with_validator(non_negative)
        .prompt()?;

    let other_assets: Decimal = CustomType::new(&format!("🏠 Other Assets ({}):", currency_code))
        .with_default(dec!(0))
        .with_error_message("Please enter a valid number")
        .with_validator(non_negative)
        .prompt()?;

    println!("\n{}", "✅ Calculating...".bold());

    Ok(AssetInput::new(cash, gold_tola, silver_tola, other_assets)?)
}

/// Offers to write the report after the results are shown.
pub fn confirm_export() -> Result<bool, Box<dyn std::error::Error>> {
    Ok(Confirm::new("📄 Generate a report file?")
        .with_default(false)
        .prompt()?)
}
