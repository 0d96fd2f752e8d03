use crate::ui::app::{App, View};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::prompt::PromptState;
use crate::ui::theme::{ACCENT, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, STATUS_ERROR};
use crate::ui::views;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const PROMPT_MIN_WIDTH: u16 = 44;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    let header_widget = Header::new(app.view(), app.last_updated());
    frame.render_widget(header_widget.widget(), header);

    frame.render_widget(Clear, body);
    match app.view() {
        View::Dashboard => views::dashboard::render(frame, body, app),
        View::Articles => views::articles::render(frame, body, app),
        View::Scrape => views::scrape::render(frame, body, app),
        View::Stats => views::stats::render(frame, body, app),
    }

    let footer_widget = Footer::new(app.view(), app.status());
    frame.render_widget(footer_widget.widget(footer), footer);

    draw_prompt(frame, body, app.prompt());
}

fn draw_prompt(frame: &mut Frame<'_>, body: ratatui::layout::Rect, prompt: &PromptState) {
    let (title, lines) = match prompt {
        PromptState::Hidden => return,
        PromptState::Confirm { message, .. } => (
            "Confirm",
            vec![
                Line::from(Span::styled(message.clone(), Style::default().fg(HEADER_TEXT))),
                Line::from(""),
                Line::from(Span::styled(
                    "y/Enter: Yes  n/Esc: No",
                    Style::default().fg(MUTED_TEXT),
                )),
            ],
        ),
        PromptState::Input {
            purpose,
            buffer,
            error,
        } => {
            let mut lines = vec![Line::from(vec![
                Span::styled("> ", Style::default().fg(ACCENT)),
                Span::styled(format!("{}█", buffer), Style::default().fg(HEADER_TEXT)),
            ])];
            if let Some(error) = error {
                lines.push(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(STATUS_ERROR),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter: Submit  Esc: Cancel",
                Style::default().fg(MUTED_TEXT),
            )));
            (purpose.title(), lines)
        }
    };

    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let popup_width = content_width.saturating_add(4).max(PROMPT_MIN_WIDTH);
    let popup_height = lines.len().saturating_add(2) as u16;
    let area = centered_rect_by_size(body, popup_width, popup_height);

    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(popup), area);
}
