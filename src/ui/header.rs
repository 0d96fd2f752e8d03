use crate::ui::app::View;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs};

pub struct Header {
    active: View,
    last_updated: Option<String>,
}

impl Header {
    pub fn new(active: View, last_updated: Option<&str>) -> Self {
        Self {
            active,
            last_updated: last_updated.map(str::to_string),
        }
    }

    pub fn widget(&self) -> Tabs<'static> {
        let titles = View::ALL
            .iter()
            .enumerate()
            .map(|(idx, view)| Line::from(format!("{} {}", idx + 1, view.title())));

        let mut block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(GLOBAL_BORDER))
            .title(Span::styled(
                " News Scraper ",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ));
        if let Some(updated) = &self.last_updated {
            block = block.title_bottom(
                Line::from(Span::styled(
                    format!(" Last updated: {} ", updated),
                    Style::default().fg(MUTED_TEXT),
                ))
                .right_aligned(),
            );
        }

        Tabs::new(titles)
            .select(self.active.index())
            .style(Style::default().fg(HEADER_TEXT))
            .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .divider(Span::styled("│", Style::default().fg(GLOBAL_BORDER)))
            .block(block)
    }
}
