//! Reducer for the article list.

use crate::ui::mvi::Reducer;

use super::intent::ArticleIntent;
use super::state::ArticleListState;

/// Pure transitions for the article list. Fetching and deleting happen in
/// the caller; only their outcomes arrive here.
pub struct ArticleReducer;

impl Reducer for ArticleReducer {
    type State = ArticleListState;
    type Intent = ArticleIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ArticleIntent::Loaded { articles } => {
                state.full_set = articles;
                state.load_error = None;
                state.loaded = true;
                state.recompute();
            }
            ArticleIntent::LoadFailed { message } => {
                state.load_error = Some(message);
            }
            ArticleIntent::Cleared => {
                state.full_set.clear();
                state.load_error = None;
                state.recompute();
            }
            ArticleIntent::Filter { term } => {
                state.search_term = term;
                state.recompute();
            }
            ArticleIntent::Sort { key } => {
                state.sort_key = Some(key);
                state.recompute();
            }
            ArticleIntent::NextPage => {
                if state.has_next_page() {
                    state.current_page += 1;
                    state.selected = 0;
                }
            }
            ArticleIntent::PreviousPage => {
                if state.has_previous_page() {
                    state.current_page -= 1;
                    state.selected = 0;
                }
            }
            ArticleIntent::SelectNext => {
                let len = state.page_slice().len();
                if state.selected + 1 < len {
                    state.selected += 1;
                }
            }
            ArticleIntent::SelectPrevious => {
                state.selected = state.selected.saturating_sub(1);
            }
        }
        state
    }
}
