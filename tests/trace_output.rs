use zakat_calc::prelude::*;

#[test]
fn test_trace_serialization() {
    let report = calculate(0, 10, 0, 0, &ZakatConfig::default()).unwrap();

    let json = serde_json::to_string(&report.calculation_trace).unwrap();

    // Operation variants are serialized as camelCase strings.
    assert!(json.contains(r#""operation":"initial""#));
    assert!(json.contains(r#""operation":"add""#));
    assert!(json.contains(r#""operation":"compare""#));
    assert!(json.contains(r#""operation":"rate""#));
    assert!(json.contains(r#""amount":"0.025""#));
}

#[test]
fn test_explain_payable() {
    let report = calculate(0, 10, 0, 0, &ZakatConfig::default()).unwrap();
    let text = report.explain();

    assert!(text.starts_with("Explanation (value-based):"));
    assert!(text.contains("Total Wealth"));
    assert!(text.contains("1982880.00"));
    assert!(text.contains("Status: PAYABLE"));
    assert!(text.contains("Amount Due: PKR 49,572.00"));
}

#[test]
fn test_explain_exempt_reason() {
    let report = calculate(50000, 0, 0, 0, &ZakatConfig::default()).unwrap();
    let text = report.explain();

    assert!(text.contains("Status: EXEMPT"));
    assert!(text.contains("Reason: Your wealth is below the Nisab threshold"));
}

#[test]
fn test_display_summary() {
    let report = calculate(50000, 0, 0, 0, &ZakatConfig::default()).unwrap();
    let summary = report.to_string();
    assert!(summary.contains("Total Wealth: PKR 50,000.00"));
    assert!(summary.contains("EXEMPT"));
}
