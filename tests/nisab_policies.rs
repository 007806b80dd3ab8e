//! Obligation outcomes under both Nisab policies.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use zakat_calc::prelude::*;
use zakat_calc::traits::is_consistent;

fn value_based() -> ZakatConfig {
    ZakatConfig::default()
}

fn unit_threshold() -> ZakatConfig {
    ZakatConfig::default().with_nisab_policy(NisabPolicy::UnitThreshold)
}

#[test]
fn test_nothing_declared() {
    for config in [value_based(), unit_threshold()] {
        let report = calculate(0, 0, 0, 0, &config).unwrap();
        assert_eq!(report.total_wealth(), Decimal::ZERO);
        assert!(!report.is_obligated());
        assert_eq!(report.payable(), Decimal::ZERO);
    }
}

#[test]
fn test_ten_tola_gold_value_based() {
    let config = ZakatConfig::new(17000, 200).unwrap();
    let report = calculate(0, 10, 0, 0, &config).unwrap();

    assert_eq!(report.breakdown.gold_value, dec!(1982880));
    assert_eq!(report.evaluation.threshold, Some(dec!(122472)));
    assert!(report.is_obligated());
    assert_eq!(report.payable(), dec!(49572));
}

#[test]
fn test_cash_below_both_thresholds() {
    let a = calculate(50000, 0, 0, 0, &value_based()).unwrap();
    let b = calculate(50000, 0, 0, 0, &unit_threshold()).unwrap();

    assert!(!a.is_obligated());
    assert!(!b.is_obligated());
    assert_eq!(a.payable(), Decimal::ZERO);
    assert_eq!(b.payable(), Decimal::ZERO);
}

#[test]
fn test_policies_diverge_on_other_assets() {
    // One tola of gold plus a house worth far more than the Nisab.
    let a = calculate(0, 1, 0, 5000000, &value_based()).unwrap();
    let b = calculate(0, 1, 0, 5000000, &unit_threshold()).unwrap();

    assert!(a.is_obligated());
    assert_eq!(a.payable(), a.total_wealth() * dec!(0.025));
    assert!(!b.is_obligated());
    assert_eq!(b.payable(), Decimal::ZERO);
    assert_eq!(a.total_wealth(), b.total_wealth());
}

#[test]
fn test_value_based_boundary_is_inclusive() {
    let report = calculate(dec!(122472), 0, 0, 0, &value_based()).unwrap();
    assert!(report.is_obligated());

    let report = calculate(dec!(122471.99), 0, 0, 0, &value_based()).unwrap();
    assert!(!report.is_obligated());
}

#[test]
fn test_gold_standard_raises_threshold() {
    let config = value_based().with_nisab_standard(NisabStandard::Gold);
    let report = calculate(dec!(500000), 0, 0, 0, &config).unwrap();
    assert_eq!(report.evaluation.threshold, Some(dec!(1487160)));
    assert!(!report.is_obligated());
}

#[test]
fn test_unit_policy_each_trigger() {
    let config = unit_threshold();
    assert!(calculate(0, dec!(7.5), 0, 0, &config).unwrap().is_obligated());
    assert!(calculate(0, 0, dec!(52.5), 0, &config).unwrap().is_obligated());
    assert!(calculate(100000, 0, 0, 0, &config).unwrap().is_obligated());
    assert!(!calculate(99999, dec!(7.4), dec!(52.4), 0, &config).unwrap().is_obligated());
}

#[test]
fn test_prices_vary_through_config() {
    let provider = StaticPriceProvider::new(20000, 250).unwrap();
    let config = ZakatConfig::from_provider(&provider).unwrap();
    let report = calculate(0, 10, 0, 0, &config).unwrap();

    assert_eq!(report.breakdown.gold_value, dec!(2332800));
    // min(87.48 x 20000, 612.36 x 250)
    assert_eq!(report.evaluation.threshold, Some(dec!(153090)));
}

#[test]
fn test_refresh_prices_revalidates() {
    let mut config = ZakatConfig::default();
    let zero_silver = StaticPriceProvider::new(17000, 0).unwrap();
    assert!(matches!(
        config.refresh_prices(&zero_silver),
        Err(ZakatError::MissingConfig { .. })
    ));
}

#[test]
fn test_payable_is_zero_or_exact_rate() {
    let samples = [
        (dec!(0), dec!(0), dec!(0), dec!(0)),
        (dec!(50000), dec!(0), dec!(0), dec!(0)),
        (dec!(0), dec!(10), dec!(0), dec!(0)),
        (dec!(12.34), dec!(0.1), dec!(3.3), dec!(99999.99)),
        (dec!(100000), dec!(7.5), dec!(52.5), dec!(1)),
    ];
    for config in [value_based(), unit_threshold()] {
        for (cash, gold, silver, other) in samples {
            let report = calculate(cash, gold, silver, other, &config).unwrap();
            assert!(is_consistent(&report), "inconsistent for {:?}", report.input);
            let sum = report.breakdown.gold_value
                + report.breakdown.silver_value
                + report.breakdown.cash_value
                + report.breakdown.other_value;
            assert_eq!(report.total_wealth(), sum);
        }
    }
}

#[test]
fn test_config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zakat.json");
    std::fs::write(
        &path,
        r#"{"gold_price_per_gram": 18000, "silver_price_per_gram": 210, "nisab_standard": "silver"}"#,
    )
    .unwrap();

    let config = ZakatConfig::try_from_json(&path).unwrap();
    assert_eq!(config.nisab_standard, NisabStandard::Silver);
    assert_eq!(config.monetary_nisab_threshold(NisabStandard::Silver).unwrap(), dec!(128595.6));
}
