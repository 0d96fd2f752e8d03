//! Filtering and ordering rules for the article list.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::article::Article;

/// Sort orders offered by the article list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Newest,
    Oldest,
    Title,
    TitleDesc,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown sort key '{0}' (expected newest, oldest, title or title-desc)")]
pub struct UnknownSortKey(pub String);

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
            Self::TitleDesc => "title-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::Title => "Title A-Z",
            Self::TitleDesc => "Title Z-A",
        }
    }

    pub fn all() -> &'static [SortKey] {
        &[Self::Newest, Self::Oldest, Self::Title, Self::TitleDesc]
    }

    /// Next key in the cycle used by the `s` key binding.
    pub fn next(current: Option<SortKey>) -> SortKey {
        match current {
            None => Self::Newest,
            Some(Self::Newest) => Self::Oldest,
            Some(Self::Oldest) => Self::Title,
            Some(Self::Title) => Self::TitleDesc,
            Some(Self::TitleDesc) => Self::Newest,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Articles from `source` matching `term`, in source order.
pub fn filter_articles(source: &[Article], term: &str) -> Vec<Article> {
    let needle = term.to_lowercase();
    source
        .iter()
        .filter(|article| article.matches(&needle))
        .cloned()
        .collect()
}

pub fn sort_articles(articles: &mut [Article], key: SortKey) {
    match key {
        SortKey::Newest => articles.sort_by_cached_key(|a| Reverse(a.created_at_millis())),
        SortKey::Oldest => articles.sort_by_cached_key(|a| a.created_at_millis()),
        SortKey::Title => articles.sort_by_cached_key(title_collation_key),
        SortKey::TitleDesc => articles.sort_by_cached_key(|a| Reverse(title_collation_key(a))),
    }
}

/// Approximates locale collation: case folds first, raw text breaks ties.
fn title_collation_key(article: &Article) -> (String, String) {
    let title = article.title.as_deref().unwrap_or("");
    (title.to_lowercase(), title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(id: i64, title: Option<&str>) -> Article {
        Article {
            id,
            title: title.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn sort_key_round_trips_through_str() {
        for key in SortKey::all() {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(*key));
        }
        assert!("relevance".parse::<SortKey>().is_err());
    }

    #[test]
    fn next_cycles_through_all_keys() {
        let mut key = SortKey::next(None);
        assert_eq!(key, SortKey::Newest);
        for _ in 0..SortKey::all().len() {
            key = SortKey::next(Some(key));
        }
        assert_eq!(key, SortKey::Newest);
    }

    #[test]
    fn title_sort_ignores_case_and_puts_missing_first() {
        let mut articles = vec![
            titled(1, Some("beta")),
            titled(2, None),
            titled(3, Some("Alpha")),
            titled(4, Some("alpha")),
        ];
        sort_articles(&mut articles, SortKey::Title);
        let ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);

        sort_articles(&mut articles, SortKey::TitleDesc);
        let ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 4, 3, 2]);
    }

    #[test]
    fn filter_keeps_source_order() {
        let articles = vec![
            titled(1, Some("Solar wind")),
            titled(2, Some("Lunar dust")),
            titled(3, Some("SOLAR flares")),
        ];
        let ids: Vec<i64> = filter_articles(&articles, "Solar")
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
