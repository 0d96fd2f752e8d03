use crate::ui::app::App;
use crate::ui::theme::{ACCENT, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK};
use crate::ui::views::panel;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

pub fn render(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let [cards, recent] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);

    let dashboard = app.dashboard();
    let (total, pages, last_scraped, status) = match &dashboard.overview {
        Some(overview) => (
            overview.total_articles.to_string(),
            overview.pages_scraped.to_string(),
            overview.last_scraped.clone(),
            overview.status_label(),
        ),
        None => ("-".into(), "-".into(), "-".into(), "Ready"),
    };
    let status_color = if status == "Active" { STATUS_OK } else { MUTED_TEXT };

    let card_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(cards);
    let card_values = [
        ("Total Articles", total, ACCENT),
        ("Pages Scraped", pages, ACCENT),
        ("Last Scraped", last_scraped, HEADER_TEXT),
        ("Status", status.to_string(), status_color),
    ];
    for ((title, value, color), card) in card_values.into_iter().zip(card_areas.iter()) {
        let widget = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(panel(title));
        frame.render_widget(widget, *card);
    }

    let mut lines = Vec::new();
    if let Some(error) = &dashboard.recent_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(STATUS_ERROR),
        )));
    } else if !dashboard.loaded {
        lines.push(Line::from("Loading..."));
    } else if dashboard.recent.is_empty() {
        lines.push(Line::from(Span::styled(
            "No articles yet. Start scraping to see articles here!",
            Style::default().fg(MUTED_TEXT),
        )));
    }
    for preview in &dashboard.recent {
        lines.push(Line::from(Span::styled(
            preview.title.clone(),
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            preview.description.clone(),
            Style::default().fg(HEADER_TEXT),
        )));
        lines.push(Line::from(Span::styled(
            format!("By {} · {}", preview.authors, preview.created),
            Style::default().fg(MUTED_TEXT),
        )));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("Recent Articles"));
    frame.render_widget(widget, recent);
}
