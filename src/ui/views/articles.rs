use crate::article::format_date;
use crate::commands::EMPTY_LIST_MESSAGE;
use crate::ui::app::App;
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR};
use crate::ui::views::panel;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;

pub fn render(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let state = app.articles();
    let [toolbar, list] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let search = if state.search_term().is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", state.search_term())
    };
    let sort = state.sort_key().map(|k| k.label()).unwrap_or("Server order");
    let toolbar_line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(MUTED_TEXT)),
        Span::styled(search, Style::default().fg(HEADER_TEXT)),
        Span::styled("   Sort: ", Style::default().fg(MUTED_TEXT)),
        Span::styled(sort, Style::default().fg(HEADER_TEXT)),
        Span::styled("   Showing ", Style::default().fg(MUTED_TEXT)),
        Span::styled(state.showing().to_string(), Style::default().fg(HEADER_TEXT)),
        Span::styled(
            format!("   Page {} of {}", state.current_page(), state.total_pages()),
            Style::default().fg(MUTED_TEXT),
        ),
    ]);
    frame.render_widget(Paragraph::new(toolbar_line).block(panel("Articles")), toolbar);

    if let Some(error) = state.load_error() {
        if state.visible_set().is_empty() {
            let widget = Paragraph::new(Line::from(Span::styled(
                format!("Error loading articles: {}. Press r to retry.", error),
                Style::default().fg(STATUS_ERROR),
            )))
            .block(panel("List"));
            frame.render_widget(widget, list);
            return;
        }
    }

    if state.visible_set().is_empty() {
        let text = if state.is_loaded() {
            EMPTY_LIST_MESSAGE
        } else {
            "Loading articles..."
        };
        let widget = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(MUTED_TEXT),
        )))
        .block(panel("List"));
        frame.render_widget(widget, list);
        return;
    }

    let items: Vec<ListItem> = state
        .page_slice()
        .iter()
        .map(|article| {
            let mut lines = vec![Line::from(Span::styled(
                article.display_title().to_string(),
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
            ))];
            let mut meta = format!("Added {}", format_date(article.created_at.as_deref()));
            if let Some(authors) = &article.authors {
                meta = format!("{} · {}", authors, meta);
            }
            lines.push(Line::from(Span::styled(meta, Style::default().fg(MUTED_TEXT))));
            if let Some(link) = &article.link {
                lines.push(Line::from(Span::styled(link.clone(), Style::default().fg(ACCENT))));
            }
            ListItem::new(lines)
        })
        .collect();

    let widget = List::new(items)
        .block(panel("List"))
        .highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT))
        .highlight_symbol("▌ ");
    let mut list_state = ListState::default().with_selected(Some(state.selected_index()));
    frame.render_stateful_widget(widget, list, &mut list_state);
}
