//! Article list view-model: load → filter → sort → paginate.

mod intent;
mod query;
mod reducer;
mod state;

pub use intent::ArticleIntent;
pub use query::{filter_articles, sort_articles, SortKey, UnknownSortKey};
pub use reducer::ArticleReducer;
pub use state::{ArticleListState, Showing, DEFAULT_PAGE_SIZE};
