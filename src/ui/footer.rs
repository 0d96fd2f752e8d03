use crate::ui::app::{StatusKind, StatusMessage, View};
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_INFO, STATUS_OK};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer<'a> {
    view: View,
    status: Option<&'a StatusMessage>,
}

impl<'a> Footer<'a> {
    pub fn new(view: View, status: Option<&'a StatusMessage>) -> Self {
        Self { view, status }
    }

    fn hints(&self) -> &'static str {
        match self.view {
            View::Dashboard => " r: Reload │ Tab: Next │ q: Quit",
            View::Articles => {
                " /: Search │ s: Sort │ ←/→: Page │ ↑/↓: Select │ c: Copy link │ r: Reload │ D: Delete all │ C: Count │ q: Quit"
            }
            View::Scrape => " l: Latest │ a: All pages │ g: Page │ R: Range │ q: Quit",
            View::Stats => " r: Refresh │ d: Debug │ e: Export │ q: Quit",
        }
    }

    /// The status message replaces the key hints while it is showing.
    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let version = format!("v{} ", VERSION);
        let dim = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let (text, style) = match self.status {
            Some(status) => {
                let color = match status.kind {
                    StatusKind::Info => STATUS_INFO,
                    StatusKind::Success => STATUS_OK,
                    StatusKind::Error => STATUS_ERROR,
                };
                // Multi-line messages (debug dumps) are flattened.
                let text = format!(" {}", status.text.replace('\n', " │ "));
                (text, Style::default().fg(color))
            }
            None => (self.hints().to_string(), dim),
        };

        // Char count, not byte count.
        let content_width = area.width.saturating_sub(2) as usize;
        let version_width = version.chars().count();
        let text: String = text
            .chars()
            .take(content_width.saturating_sub(version_width))
            .collect();
        let padding = content_width
            .saturating_sub(text.chars().count())
            .saturating_sub(version_width);

        let line = Line::from(vec![
            Span::styled(text, style),
            Span::styled(" ".repeat(padding), dim),
            Span::styled(version, dim),
        ]);

        Paragraph::new(line).alignment(Alignment::Left).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
