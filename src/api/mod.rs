//! HTTP gateway to the news backend.
//!
//! Every call resolves to `Result<_, ApiError>`; nothing here retries.

mod client;
mod error;

pub use client::{NewsClient, MAX_SCRAPE_PAGE, MIN_SCRAPE_PAGE};
pub use error::ApiError;
