//! One module per tab. Each draws into the body area and reads `App` only.

pub mod articles;
pub mod dashboard;
pub mod scrape;
pub mod stats;

use crate::ui::theme::{ACCENT, GLOBAL_BORDER};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
}
