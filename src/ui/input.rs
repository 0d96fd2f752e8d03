use crate::scrape::ScrapeJob;
use crate::ui::app::{App, View};
use crate::ui::prompt::{PromptIntent, PromptState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    if app.prompt().is_visible() {
        handle_prompt_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.request_quit();
            return;
        }
        KeyCode::Tab => {
            app.switch_view(app.view().next());
            return;
        }
        KeyCode::Char(ch) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            if let Some(view) = View::from_digit(ch) {
                app.switch_view(view);
                return;
            }
        }
        _ => {}
    }

    match app.view() {
        View::Dashboard => {
            if key.code == KeyCode::Char('r') {
                app.reload();
            }
        }
        View::Articles => handle_articles_key(app, key),
        View::Scrape => handle_scrape_key(app, key),
        View::Stats => handle_stats_key(app, key),
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match app.prompt() {
        PromptState::Hidden => {}
        PromptState::Confirm { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_prompt(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_prompt(),
            _ => {}
        },
        PromptState::Input { .. } => match key.code {
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Enter => app.submit_prompt(),
            KeyCode::Backspace => app.dispatch_prompt(PromptIntent::Backspace),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.dispatch_prompt(PromptIntent::Type(ch))
            }
            _ => {}
        },
    }
}

fn handle_articles_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Left | KeyCode::Char('p') => app.previous_page(),
        KeyCode::Right | KeyCode::Char('n') => app.next_page(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('c') => app.copy_selected_link(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('D') => app.request_delete_all(),
        KeyCode::Char('C') => app.request_count(),
        _ => {}
    }
}

fn handle_scrape_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') => app.request_scrape(ScrapeJob::Latest),
        KeyCode::Char('a') => app.request_scrape(ScrapeJob::AllPages),
        KeyCode::Char('g') => app.open_page_prompt(),
        KeyCode::Char('R') => app.open_range_prompt(),
        _ => {}
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.refresh_stats(),
        KeyCode::Char('d') => app.request_debug_dump(),
        KeyCode::Char('e') => app.export_stats(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
