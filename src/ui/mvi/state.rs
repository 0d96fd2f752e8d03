//! Base trait for view state.

/// Marker trait for view state objects.
///
/// A state value holds everything its view needs to render and is replaced
/// wholesale on every transition.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
