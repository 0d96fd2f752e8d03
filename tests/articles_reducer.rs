//! Tests for the article list view-model: filtering, sorting and paging.

mod common;

use common::{article, numbered_articles};
use newsdesk::article::Article;
use newsdesk::ui::articles::{ArticleIntent, ArticleListState, ArticleReducer, SortKey};
use newsdesk::ui::mvi::Reducer;

fn loaded(articles: Vec<Article>, page_size: usize) -> ArticleListState {
    ArticleReducer::reduce(
        ArticleListState::with_page_size(page_size),
        ArticleIntent::Loaded { articles },
    )
}

fn apply(state: ArticleListState, intents: Vec<ArticleIntent>) -> ArticleListState {
    intents.into_iter().fold(state, ArticleReducer::reduce)
}

fn ids(articles: &[Article]) -> Vec<i64> {
    articles.iter().map(|a| a.id).collect()
}

/// 25 articles at 10 per page: pages hold 10, 10 and 5 items.
#[test]
fn test_twenty_five_articles_paginate_into_three_pages() {
    let state = loaded(numbered_articles(25), 10);
    assert_eq!(state.total_pages(), 3);
    assert_eq!(ids(state.page_slice()), (1..=10).collect::<Vec<_>>());

    let state = apply(state, vec![ArticleIntent::NextPage, ArticleIntent::NextPage]);
    assert_eq!(state.current_page(), 3);
    assert_eq!(ids(state.page_slice()), (21..=25).collect::<Vec<_>>());
    assert_eq!(state.showing().to_string(), "21-25 of 25");

    let state = ArticleReducer::reduce(state, ArticleIntent::NextPage);
    assert_eq!(state.current_page(), 3);
}

/// Going back from page 1 stays on page 1.
#[test]
fn test_previous_page_clamps_at_first() {
    let state = loaded(numbered_articles(5), 10);
    let state = ArticleReducer::reduce(state, ArticleIntent::PreviousPage);
    assert_eq!(state.current_page(), 1);
}

/// Every slice is at most one page long; only the last may be shorter.
#[test]
fn test_page_slice_never_exceeds_page_size() {
    for total in [0, 1, 9, 10, 11, 30, 31] {
        let mut state = loaded(numbered_articles(total), 10);
        for page in 1..=state.total_pages().max(1) {
            let len = state.page_slice().len();
            assert!(len <= 10);
            if page < state.total_pages() {
                assert_eq!(len, 10);
            }
            state = ArticleReducer::reduce(state, ArticleIntent::NextPage);
        }
    }
}

/// Every match contains the term in title, description or authors.
#[test]
fn test_filter_results_all_contain_term() {
    let mut articles = numbered_articles(12);
    articles.push(Article {
        authors: Some("Alex SMITH".into()),
        ..article(100, "Markets", "2024-02-01T00:00:00Z")
    });
    let state = loaded(articles, 10);

    for term in ["smith", "article 1", "DESCRIPTION OF ARTICLE 0", "zzz"] {
        let filtered = ArticleReducer::reduce(
            state.clone(),
            ArticleIntent::Filter { term: term.into() },
        );
        let needle = term.to_lowercase();
        for a in filtered.visible_set() {
            let hit = [&a.title, &a.description, &a.authors]
                .iter()
                .any(|f| f.as_deref().unwrap_or("").to_lowercase().contains(&needle));
            assert!(hit, "article {} does not match {:?}", a.id, term);
        }
    }
}

/// An empty author field does not match on its own.
#[test]
fn test_empty_authors_do_not_match() {
    let state = loaded(
        vec![Article {
            authors: Some(String::new()),
            description: Some("Economy".into()),
            ..article(1, "Budget", "2024-01-01T00:00:00Z")
        }],
        10,
    );
    let state = ArticleReducer::reduce(state, ArticleIntent::Filter { term: "smith".into() });
    assert!(state.visible_set().is_empty());
}

/// The empty term restores the full set in server order.
#[test]
fn test_empty_filter_keeps_server_order() {
    let state = loaded(numbered_articles(15), 10);
    let state = apply(
        state,
        vec![
            ArticleIntent::Filter { term: "article 1".into() },
            ArticleIntent::NextPage,
            ArticleIntent::Filter { term: String::new() },
        ],
    );
    assert_eq!(ids(state.visible_set()), (1..=15).collect::<Vec<_>>());
    assert_eq!(state.current_page(), 1);
}

/// Newest and oldest orders are exact reverses without ties.
#[test]
fn test_newest_and_oldest_are_reverses() {
    let state = loaded(numbered_articles(9), 10);
    let newest = ArticleReducer::reduce(state.clone(), ArticleIntent::Sort { key: SortKey::Newest });
    let oldest = ArticleReducer::reduce(state, ArticleIntent::Sort { key: SortKey::Oldest });

    let mut reversed = ids(oldest.visible_set());
    reversed.reverse();
    assert_eq!(ids(newest.visible_set()), reversed);
    assert_eq!(newest.visible_set()[0].id, 9);
}

/// Missing titles sort as the empty string.
#[test]
fn test_title_sort_puts_untitled_first() {
    let articles = vec![
        article(1, "beta", "2024-01-01T00:00:00Z"),
        Article {
            title: None,
            ..article(2, "", "2024-01-02T00:00:00Z")
        },
        article(3, "Alpha", "2024-01-03T00:00:00Z"),
    ];
    let state = loaded(articles, 10);
    let asc = ArticleReducer::reduce(state.clone(), ArticleIntent::Sort { key: SortKey::Title });
    assert_eq!(ids(asc.visible_set()), vec![2, 3, 1]);
    let desc = ArticleReducer::reduce(state, ArticleIntent::Sort { key: SortKey::TitleDesc });
    assert_eq!(ids(desc.visible_set()), vec![1, 3, 2]);
}

/// Sorting resets to page 1.
#[test]
fn test_sort_resets_page() {
    let state = apply(
        loaded(numbered_articles(25), 10),
        vec![ArticleIntent::NextPage, ArticleIntent::Sort { key: SortKey::Oldest }],
    );
    assert_eq!(state.current_page(), 1);
}

/// A reload keeps the active search and sort.
#[test]
fn test_reload_reapplies_search_and_sort() {
    let state = apply(
        loaded(numbered_articles(5), 10),
        vec![
            ArticleIntent::Filter { term: "article 0".into() },
            ArticleIntent::Sort { key: SortKey::Newest },
            ArticleIntent::Loaded { articles: numbered_articles(8) },
        ],
    );
    assert_eq!(ids(state.visible_set()), vec![8, 7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(state.search_term(), "article 0");
}

/// A failed load keeps the previous articles and page.
#[test]
fn test_load_failure_leaves_state_untouched() {
    let state = apply(loaded(numbered_articles(25), 10), vec![ArticleIntent::NextPage]);
    let failed = ArticleReducer::reduce(
        state.clone(),
        ArticleIntent::LoadFailed { message: "HTTP error! status: 500".into() },
    );
    assert_eq!(failed.visible_set(), state.visible_set());
    assert_eq!(failed.current_page(), 2);
    assert_eq!(failed.load_error(), Some("HTTP error! status: 500"));

    let recovered = ArticleReducer::reduce(
        failed,
        ArticleIntent::Loaded { articles: numbered_articles(3) },
    );
    assert_eq!(recovered.load_error(), None);
}

/// Clearing empties both sets and resets paging.
#[test]
fn test_cleared_empties_everything() {
    let state = apply(
        loaded(numbered_articles(25), 10),
        vec![ArticleIntent::NextPage, ArticleIntent::Cleared],
    );
    assert!(state.full_set().is_empty());
    assert!(state.visible_set().is_empty());
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.showing().to_string(), "0-0 of 0");
}

/// The cursor stays on the current page.
#[test]
fn test_selection_is_bounded_by_page() {
    let state = loaded(numbered_articles(12), 10);
    let state = apply(state, (0..20).map(|_| ArticleIntent::SelectNext).collect());
    assert_eq!(state.selected().map(|a| a.id), Some(10));

    let state = ArticleReducer::reduce(state, ArticleIntent::NextPage);
    assert_eq!(state.selected().map(|a| a.id), Some(11));
}
