use crate::storage::ActivityKind;
use crate::ui::app::App;
use crate::ui::theme::{
    ACCENT, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_INFO, STATUS_OK, STATUS_WARN,
};
use crate::ui::views::panel;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;

pub fn render(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let [actions, progress, activity] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(ACCENT));
    let text = |t: String| Span::styled(t, Style::default().fg(HEADER_TEXT));
    let last_scraped = app.local().last_scraped.as_deref().unwrap_or("-");
    let action_lines = vec![
        Line::from(vec![key("  l  "), text("Scrape latest articles".into())]),
        Line::from(vec![key("  a  "), text("Scrape all pages (1-10)".into())]),
        Line::from(vec![key("  g  "), text("Scrape a single page".into())]),
        Line::from(vec![key("  R  "), text("Scrape a range of pages".into())]),
        Line::from(Span::styled(
            format!("  Last scraped: {}", last_scraped),
            Style::default().fg(MUTED_TEXT),
        )),
    ];
    frame.render_widget(Paragraph::new(action_lines).block(panel("Scrape")), actions);

    let status = app.scrape_status();
    let (percent, label) = match &status.progress {
        Some(p) => (p.percent(), p.label.clone()),
        None => (0, "Idle".to_string()),
    };
    let gauge = Gauge::default()
        .block(panel("Progress"))
        .gauge_style(Style::default().fg(ACCENT))
        .percent(percent.min(100))
        .label(format!("{}% {}", percent, label));
    frame.render_widget(gauge, progress);

    let activities = &app.local().activities;
    let lines: Vec<Line> = if activities.is_empty() {
        vec![Line::from(Span::styled(
            "No recent activity. Start scraping to see activity here!",
            Style::default().fg(MUTED_TEXT),
        ))]
    } else {
        activities
            .iter()
            .map(|a| {
                let color = match a.kind {
                    ActivityKind::Info => STATUS_INFO,
                    ActivityKind::Success => STATUS_OK,
                    ActivityKind::Warning => STATUS_WARN,
                    ActivityKind::Error => STATUS_ERROR,
                };
                Line::from(vec![
                    Span::styled(format!("{}  ", a.timestamp), Style::default().fg(MUTED_TEXT)),
                    Span::styled("● ", Style::default().fg(color)),
                    Span::styled(a.message.clone(), Style::default().fg(HEADER_TEXT)),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).block(panel("Recent Activity")), activity);
}
