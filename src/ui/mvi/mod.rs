//! Model-View-Intent primitives.
//!
//! Screens keep their state in a [`UiState`] value and only change it by
//! running an [`Intent`] through a [`Reducer`]:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Network calls, storage writes and timers stay outside the reducer; the
//! caller performs them and feeds the outcome back in as an intent.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
