//! Plain terminal output: metrics, breakdown table and a bar chart.

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use zakat_calc::prelude::*;
use zakat_calc::report::chart::proportions;
use zakat_calc::report::nisab_summary;

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Breakdown rows as a rounded table.
pub fn breakdown_table(report: &ZakatReport) -> String {
    let rows: Vec<BreakdownRow> = breakdown_lines(report)
        .into_iter()
        .map(|line| BreakdownRow {
            category: line.label,
            amount: line.formatted,
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Colored horizontal bars, one per wealth category.
pub struct TerminalChart {
    width: usize,
    pub output: String,
}

impl TerminalChart {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            output: String::new(),
        }
    }
}

impl ChartSink for TerminalChart {
    fn render(&mut self, title: &str, slices: &[ChartSlice]) -> Result<(), ZakatError> {
        use std::fmt::Write;

        let label_width = slices.iter().map(|s| s.label.len()).max().unwrap_or(0);
        let mut out = String::new();
        let _ = writeln!(out, "{}", title.bold());

        for (slice, share) in slices.iter().zip(proportions(slices)) {
            let filled = ((share * self.width as f64).round() as usize).min(self.width);
            let bar = "█".repeat(filled);
            let bar = match slice.label.as_str() {
                "Gold" => bar.yellow(),
                "Silver" => bar.white(),
                "Cash" => bar.green(),
                _ => bar.cyan(),
            };
            let _ = writeln!(
                out,
                "  {:<label_width$} {}{} {:>5.1}%",
                slice.label,
                bar,
                " ".repeat(self.width - filled),
                share * 100.0,
                label_width = label_width
            );
        }

        self.output = out;
        Ok(())
    }
}

/// Everything the calculator shows for one report.
pub fn render_report(report: &ZakatReport) -> Result<String, ZakatError> {
    let mut out = String::new();
    let code = &report.currency_code;

    out.push_str(&format!(
        "{} {}\n",
        "💰 Total Wealth:".bold(),
        format_currency(report.total_wealth(), code).bright_white()
    ));
    out.push_str(&format!(
        "{} {}\n",
        "   Nisab:".dimmed(),
        nisab_summary(report).dimmed()
    ));

    if report.is_obligated() {
        out.push_str(&format!("{} {}\n", "🕌 Zakat Payable:".bold(), report.format_amount().bright_green().bold()));
        out.push_str(&format!("{}\n", obligation_message(report).italic()));
    } else {
        out.push_str(&format!("{}\n", format!("❌ {}", obligation_message(report)).bright_red().bold()));
    }

    out.push_str(&format!("\n{}\n", "📊 Wealth Breakdown:".bold()));
    out.push_str(&breakdown_table(report));
    out.push('\n');

    let mut chart = TerminalChart::new(30);
    render_chart(report, &mut chart)?;
    out.push('\n');
    out.push_str(&chart.output);

    Ok(out)
}

/// Exports and reports the outcome without aborting the session.
pub fn export_with_feedback(report: &ZakatReport, exporter: &dyn ReportExporter) -> Result<(), ZakatError> {
    match exporter.export(report) {
        Ok(path) => {
            println!("{} {}", "✅ Report Generated!".green().bold(), path.display());
            Ok(())
        }
        Err(e) if e.is_recoverable() => {
            eprintln!("{} {}", "⚠ Could not export report:".yellow().bold(), e);
            Err(e)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(cash: i64, gold: i64) -> ZakatReport {
        calculate(cash, gold, 0, 0, &ZakatConfig::default()).unwrap()
    }

    #[test]
    fn test_breakdown_table_has_all_rows() {
        colored::control::set_override(false);
        let table = breakdown_table(&report(0, 10));
        assert!(table.contains("Gold (10 Tola)"));
        assert!(table.contains("PKR 1,982,880.00"));
        assert!(table.contains("Zakat Payable"));
        assert!(table.contains("PKR 49,572.00"));
    }

    #[test]
    fn test_render_report_exempt_message() {
        colored::control::set_override(false);
        let out = render_report(&report(50000, 0)).unwrap();
        assert!(out.contains("Your wealth is below the Nisab threshold"));
        assert!(out.contains("Wealth Distribution"));
        assert!(!out.contains("Zakat Payable:"));
    }

    #[test]
    fn test_terminal_chart_zero_total() {
        colored::control::set_override(false);
        let mut chart = TerminalChart::new(10);
        render_chart(&report(0, 0), &mut chart).unwrap();
        assert_eq!(chart.output.lines().count(), 5);
        assert!(chart.output.contains("0.0%"));
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FileExporter::new(dir.path().join("nope").join("r.txt"), ExportFormat::Text);
        let err = export_with_feedback(&report(0, 10), &exporter).unwrap_err();
        assert!(err.is_recoverable());
    }
}
