#[cfg(test)]
mod tests {
    use crate::tui::app::{App, MessageType, Screen};
    use crate::tui::event::handle_key;
    use crate::tui::ui::ui;
    use crossterm::event::KeyCode;
    use ratatui::{Terminal, backend::TestBackend};
    use zakat_calc::prelude::*;

    fn sample_app(dir: &std::path::Path) -> App {
        let config = ZakatConfig::default();
        let report = AssetInput::new(50_000, 10, 3, 15_000)
            .unwrap()
            .calculate_zakat(&config)
            .unwrap();
        App::new(report, config, Box::new(FileExporter::in_dir(dir, ExportFormat::Text)))
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..height {
            for x in 0..width {
                if let Some(cell) = buffer.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_ui_render_header() {
        let dir = tempfile::tempdir().unwrap();
        let app = sample_app(dir.path());
        let text = screen_text(&app, 100, 30);

        let first_line = text.lines().next().unwrap();
        assert!(first_line.contains("ZAKAT"), "Header should contain 'ZAKAT' branding");
    }

    #[test]
    fn test_ui_render_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let app = sample_app(dir.path());
        let text = screen_text(&app, 120, 32);

        assert!(text.contains("Wealth Distribution"));
        assert!(text.contains("Total Wealth"));
        assert!(text.contains("Zakat Payable"));
    }

    #[test]
    fn test_ui_render_exempt_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = ZakatConfig::default();
        let report = AssetInput::default().calculate_zakat(&config).unwrap();
        let app = App::new(report, config, Box::new(FileExporter::in_dir(dir.path(), ExportFormat::Text)));

        // Zero totals must still draw the chart panel.
        let text = screen_text(&app, 120, 32);
        assert!(text.contains("Wealth Distribution"));
        assert!(text.contains("Exempt"));
    }

    #[test]
    fn test_nisab_card_shows_progress() {
        let dir = tempfile::tempdir().unwrap();
        let config = ZakatConfig::default();
        // Half of the default silver Nisab (612.36 g x 200).
        let report = AssetInput::new(61_236, 0, 0, 0).unwrap().calculate_zakat(&config).unwrap();
        let app = App::new(report, config, Box::new(FileExporter::in_dir(dir.path(), ExportFormat::Text)));

        let text = screen_text(&app, 150, 32);
        assert!(text.contains("50% of Nisab"));
    }

    #[test]
    fn test_unit_policy_card_shows_policy_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = ZakatConfig::default().with_nisab_policy(NisabPolicy::UnitThreshold);
        let report = AssetInput::new(0, 8, 0, 0).unwrap().calculate_zakat(&config).unwrap();
        let app = App::new(report, config, Box::new(FileExporter::in_dir(dir.path(), ExportFormat::Text)));

        let text = screen_text(&app, 150, 32);
        assert!(text.contains("unit-threshold"));
        assert!(!text.contains("of Nisab"));
    }

    #[test]
    fn test_ui_render_help() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = sample_app(dir.path());
        handle_key(&mut app, KeyCode::Char('?'));
        assert_eq!(app.screen, Screen::Help);

        let text = screen_text(&app, 100, 30);
        assert!(text.contains("Export report"));
    }

    #[test]
    fn test_explanation_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = sample_app(dir.path());

        handle_key(&mut app, KeyCode::Char('x'));
        assert_eq!(app.screen, Screen::Explanation);
        let text = screen_text(&app, 120, 40);
        assert!(text.contains("Calculation Trace"));

        handle_key(&mut app, KeyCode::Char('x'));
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn test_export_key_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = sample_app(dir.path());
        let before = app.report.clone();

        handle_key(&mut app, KeyCode::Char('e'));

        assert!(dir.path().join("Zakat_Report.txt").exists());
        assert!(matches!(app.message, Some((_, MessageType::Success))));
        assert_eq!(app.report, before);
    }

    #[test]
    fn test_failed_export_keeps_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let config = ZakatConfig::default();
        let report = AssetInput::new(200_000, 0, 0, 0)
            .unwrap()
            .calculate_zakat(&config)
            .unwrap();
        let mut app = App::new(report, config, Box::new(FileExporter::in_dir(&missing, ExportFormat::Text)));

        handle_key(&mut app, KeyCode::Char('e'));

        assert!(app.running);
        assert!(matches!(app.message, Some((_, MessageType::Error))));
        let text = screen_text(&app, 120, 32);
        assert!(text.contains("Export failed"));
    }

    #[test]
    fn test_escape_and_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = sample_app(dir.path());

        handle_key(&mut app, KeyCode::Char('?'));
        handle_key(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.running);

        handle_key(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
