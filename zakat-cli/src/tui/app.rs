//! Dashboard state.

use zakat_calc::prelude::*;

/// Current view of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Metrics, breakdown and chart
    #[default]
    Dashboard,
    /// Step-by-step calculation trace
    Explanation,
    Help,
}

/// Type of status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Error,
}

/// Main application state
pub struct App {
    /// Whether the app should keep running
    pub running: bool,
    pub screen: Screen,
    /// The computation being shown. Never changed by a failed export.
    pub report: ZakatReport,
    pub config: ZakatConfig,
    pub exporter: Box<dyn ReportExporter>,
    /// Status message to display
    pub message: Option<(String, MessageType)>,
}

impl App {
    pub fn new(report: ZakatReport, config: ZakatConfig, exporter: Box<dyn ReportExporter>) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            report,
            config,
            exporter,
            message: Some(("Press 'e' to export the report, '?' for help".to_string(), MessageType::Info)),
        }
    }

    pub fn export(&mut self) {
        self.message = Some(match self.exporter.export(&self.report) {
            Ok(path) => (format!("Report Generated! {}", path.display()), MessageType::Success),
            Err(e) => (format!("Export failed: {}", e), MessageType::Error),
        });
    }

    pub fn toggle(&mut self, screen: Screen) {
        self.screen = if self.screen == screen { Screen::Dashboard } else { screen };
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
