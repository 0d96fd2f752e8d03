use crate::stats::{ChartBar, DbStatus, StatsSnapshot};
use crate::ui::app::App;
use crate::ui::theme::{ACCENT, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK};
use crate::ui::views::panel;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Width of a full-height (100%) bar.
const BAR_WIDTH: u16 = 40;

pub fn render(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(stats) = app.stats() else {
        let widget = Paragraph::new(Line::from(Span::styled(
            "Loading statistics...",
            Style::default().fg(MUTED_TEXT),
        )))
        .block(panel("Statistics"));
        frame.render_widget(widget, area);
        return;
    };

    let [top, chart] =
        Layout::vertical([Constraint::Length(7), Constraint::Min(0)]).areas(area);
    let [overview, distribution, system] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(top);

    frame.render_widget(
        Paragraph::new(overview_lines(stats)).block(panel("Overview")),
        overview,
    );

    let d = &stats.distribution;
    frame.render_widget(
        Paragraph::new(vec![
            row("With description", d.with_description.to_string()),
            row("With authors", d.with_authors.to_string()),
            row("With links", d.with_links.to_string()),
        ])
        .block(panel("Content")),
        distribution,
    );

    let db_color = match stats.db_status {
        DbStatus::Connected => STATUS_OK,
        DbStatus::Error => STATUS_ERROR,
    };
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Database: ", Style::default().fg(MUTED_TEXT)),
                Span::styled(stats.db_status.label(), Style::default().fg(db_color)),
            ]),
            row("Uptime", stats.uptime.clone()),
        ])
        .block(panel("System")),
        system,
    );

    frame.render_widget(
        Paragraph::new(chart_lines(&stats.chart, stats.articles_error.as_deref()))
            .block(panel("Articles per Day")),
        chart,
    );
}

fn overview_lines(stats: &StatsSnapshot) -> Vec<Line<'static>> {
    let o = &stats.overview;
    vec![
        row("Total articles", o.total_articles.to_string()),
        row("Pages scraped", o.pages_scraped.to_string()),
        row("Avg per page", o.avg_per_page.to_string()),
        row("Last scraped", o.last_scraped.clone()),
    ]
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(MUTED_TEXT)),
        Span::styled(value, Style::default().fg(HEADER_TEXT)),
    ])
}

fn chart_lines(chart: &[ChartBar], error: Option<&str>) -> Vec<Line<'static>> {
    if let Some(error) = error {
        return vec![Line::from(Span::styled(
            format!("Articles unavailable: {}", error),
            Style::default().fg(STATUS_ERROR),
        ))];
    }
    if chart.is_empty() {
        return vec![Line::from(Span::styled(
            "No data yet",
            Style::default().fg(MUTED_TEXT),
        ))];
    }
    chart
        .iter()
        .map(|bar| {
            let width = (u32::from(bar.height) * u32::from(BAR_WIDTH) / 100) as usize;
            Line::from(vec![
                Span::styled(
                    format!("{} ", bar.date.format("%a %m/%d")),
                    Style::default().fg(MUTED_TEXT),
                ),
                Span::styled("█".repeat(width), Style::default().fg(ACCENT)),
                Span::styled(format!(" {}", bar.count), Style::default().fg(HEADER_TEXT)),
            ])
        })
        .collect()
}
