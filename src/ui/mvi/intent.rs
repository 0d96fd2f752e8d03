//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents cover key presses that change a view (filter, sort, paging)
/// and backend outcomes (articles loaded, load failed, store cleared).
pub trait Intent: Send + 'static {}
