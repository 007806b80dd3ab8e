//! UI rendering for the dashboard.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use zakat_calc::prelude::*;
use zakat_calc::report::chart::{CHART_TITLE, chart_data, proportions};
use zakat_calc::report::{LineKind, nisab_summary};

use crate::tui::app::{App, MessageType, Screen};
use crate::tui::components::StatCard;
use crate::tui::theme::{icons, theme};

/// Shares are drawn in basis points so the bar scale is fixed.
const BAR_SCALE: u64 = 10_000;

// ═══════════════════════════════════════════════════════════════════════════
// MAIN UI ENTRY POINT
// ═══════════════════════════════════════════════════════════════════════════

pub fn ui(frame: &mut Frame, app: &App) {
    let t = theme();

    frame.render_widget(Clear, frame.area());
    frame.render_widget(Block::default().style(t.bg()), frame.area());

    // Root Layout: Header | Main Content | Status Bar
    let root_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, root_layout[0], app);

    match app.screen {
        Screen::Dashboard => render_dashboard(frame, root_layout[1], app),
        Screen::Explanation => render_explanation(frame, root_layout[1], app),
        Screen::Help => render_help(frame, root_layout[1]),
    }

    render_status_bar(frame, root_layout[2], app);
}

// ═══════════════════════════════════════════════════════════════════════════
// HEADER
// ═══════════════════════════════════════════════════════════════════════════

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();

    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(t.slate_light))
        .style(t.bg());

    let inner = header_block.inner(area);
    frame.render_widget(header_block, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    let brand = Line::from(vec![
        Span::raw(" "),
        Span::styled(icons::MOON, Style::default().fg(t.gold)),
        Span::raw(" "),
        Span::styled("ZAKAT", t.title()),
        Span::styled(" CALCULATOR", Style::default().fg(t.text_primary).add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(brand).alignment(Alignment::Left), layout[0]);

    let code = &app.config.currency_code;
    let prices_line = Line::from(vec![
        Span::styled("Gold: ", Style::default().fg(t.gold)),
        Span::styled(
            format!("{}/g", format_currency(app.config.gold_price_per_gram, code)),
            t.text(),
        ),
        Span::raw(" "),
        Span::styled(icons::SEPARATOR, Style::default().fg(t.slate_light)),
        Span::raw(" "),
        Span::styled("Silver: ", Style::default().fg(t.text_muted)),
        Span::styled(
            format!("{}/g", format_currency(app.config.silver_price_per_gram, code)),
            t.text(),
        ),
        Span::raw(" "),
    ]);
    frame.render_widget(Paragraph::new(prices_line).alignment(Alignment::Right), layout[1]);
}

// ═══════════════════════════════════════════════════════════════════════════
// DASHBOARD
// ═══════════════════════════════════════════════════════════════════════════

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Stat cards
            Constraint::Length(1), // Obligation message
            Constraint::Min(8),    // Breakdown + chart
        ])
        .split(area);

    render_stat_cards(frame, rows[0], app);
    render_obligation(frame, rows[1], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    render_breakdown(frame, columns[0], app);
    render_chart_panel(frame, columns[1], app);
}

fn render_stat_cards(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();
    let report = &app.report;
    let code = &report.currency_code;

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let total = format_currency(report.total_wealth(), code);
    StatCard::new("Total Wealth", &total).render(frame, cards[0]);

    let payable = report.format_amount();
    let (status, color) = if report.is_obligated() {
        (format!("{} Payable", icons::CHECK), t.emerald)
    } else {
        (format!("{} Exempt", icons::CROSS), t.text_muted)
    };
    StatCard::new("Zakat Payable", &payable)
        .value_color(color)
        .highlighted(report.is_obligated())
        .subtitle(&status)
        .render(frame, cards[1]);

    let nisab = nisab_summary(report);
    let policy = report.evaluation.policy.to_string();
    let card = StatCard::new("Nisab", &nisab);
    // Only the value-based policy has a threshold to measure progress against.
    let card = if report.evaluation.threshold.is_some() {
        card.progress(report.evaluation.nisab_progress)
    } else {
        card.subtitle(&policy)
    };
    card.render(frame, cards[2]);
}

fn render_obligation(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();
    let style = if app.report.is_obligated() {
        t.success_style()
    } else {
        t.error_style()
    };
    frame.render_widget(
        Paragraph::new(obligation_message(&app.report))
            .style(style)
            .alignment(Alignment::Center),
        area,
    );
}

fn render_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();

    let items: Vec<ListItem> = breakdown_lines(&app.report)
        .into_iter()
        .map(|line| {
            let label_style = match line.kind {
                LineKind::Category(w) => Style::default().fg(t.wealth_color(w)),
                LineKind::TotalWealth | LineKind::ZakatPayable => t.title(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", icons::BULLET), Style::default().fg(t.text_muted)),
                Span::styled(format!("{}: ", line.label), label_style),
                Span::styled(line.formatted, t.text()),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Wealth Breakdown ", t.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(t.border_inactive());

    frame.render_widget(List::new(items).block(block), area);
}

fn render_chart_panel(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();

    let slices = chart_data(&app.report.breakdown);
    let shares = proportions(&slices);
    let colors = [WealthType::Cash, WealthType::Gold, WealthType::Silver, WealthType::OtherAssets]
        .map(|w| t.wealth_color(w));

    let bars: Vec<Bar> = slices
        .iter()
        .zip(shares)
        .zip(colors)
        .map(|((slice, share), color)| {
            Bar::default()
                .value((share * BAR_SCALE as f64).round() as u64)
                .label(Line::from(slice.label.clone()))
                .text_value(format!("{:.1}%", share * 100.0))
                .style(Style::default().fg(color))
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(format!(" {} ", CHART_TITLE), t.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(t.border_inactive());

    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width / 4).saturating_sub(1).max(1);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(BAR_SCALE);

    frame.render_widget(chart, area);
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPLANATION & HELP
// ═══════════════════════════════════════════════════════════════════════════

fn render_explanation(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();
    let block = Block::default()
        .title(Span::styled(" Calculation Trace ", t.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(t.border_active());

    frame.render_widget(
        Paragraph::new(app.report.explain())
            .style(t.text())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_help(frame: &mut Frame, area: Rect) {
    let t = theme();
    let keys = [
        ("e", "Export report"),
        ("x", "Show / hide calculation trace"),
        ("?", "Show / hide this help"),
        ("Esc", "Back / quit"),
        ("q", "Quit"),
    ];

    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<5}", key), t.title()),
                Span::styled(*action, t.text()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Help ", t.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(t.border_active());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ═══════════════════════════════════════════════════════════════════════════
// STATUS BAR
// ═══════════════════════════════════════════════════════════════════════════

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let t = theme();

    let line = match &app.message {
        Some((text, kind)) => {
            let style = match kind {
                MessageType::Info => t.subtitle(),
                MessageType::Success => t.success_style(),
                MessageType::Error => t.error_style(),
            };
            Line::from(Span::styled(format!(" {}", text), style))
        }
        None => Line::from(Span::styled(" e export  x trace  ? help  q quit", t.subtitle())),
    };

    frame.render_widget(Paragraph::new(line), area);
}
