//! Metric card: a label, one headline amount and a footer.
//!
//! The footer is either a status line (e.g. "✓ Payable") or a gauge showing
//! how far wealth has come towards the Nisab.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, LineGauge, Paragraph},
};

use crate::tui::theme::theme;

enum Footer<'a> {
    None,
    Status(&'a str),
    /// Share in `0.0..=1.0`
    Progress(f64),
}

pub struct StatCard<'a> {
    label: &'a str,
    amount: &'a str,
    amount_color: Color,
    /// Drawn with the gold border when the figure is the one that matters (e.g. payable).
    emphasized: bool,
    footer: Footer<'a>,
}

impl<'a> StatCard<'a> {
    pub fn new(label: &'a str, amount: &'a str) -> Self {
        Self {
            label,
            amount,
            amount_color: theme().text_primary,
            emphasized: false,
            footer: Footer::None,
        }
    }

    pub fn value_color(mut self, color: Color) -> Self {
        self.amount_color = color;
        self
    }

    pub fn highlighted(mut self, emphasized: bool) -> Self {
        self.emphasized = emphasized;
        self
    }

    pub fn subtitle(mut self, status: &'a str) -> Self {
        self.footer = Footer::Status(status);
        self
    }

    /// Replaces the footer with a Nisab progress gauge.
    pub fn progress(mut self, share: f64) -> Self {
        self.footer = Footer::Progress(share.clamp(0.0, 1.0));
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.emphasized { t.border_active() } else { t.border_inactive() })
            .style(t.bg());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [head, foot] = Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).areas(inner);

        let heading = vec![
            Line::from(Span::styled(self.label, t.subtitle())),
            Line::from(Span::styled(
                self.amount,
                Style::default().fg(self.amount_color).add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(Paragraph::new(heading), head);

        match self.footer {
            Footer::None => {}
            Footer::Status(status) => {
                frame.render_widget(Paragraph::new(status).style(Style::default().fg(t.text_muted)), foot);
            }
            Footer::Progress(share) => {
                let color = if share >= 1.0 { t.emerald } else { t.gold };
                let gauge = LineGauge::default()
                    .filled_style(Style::default().fg(color))
                    .unfilled_style(Style::default().fg(t.slate_light))
                    .label(format!("{:>3.0}% of Nisab", share * 100.0))
                    .ratio(share);
                frame.render_widget(gauge, foot);
            }
        }
    }
}
