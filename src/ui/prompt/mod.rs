//! Modal prompt: yes/no confirmation or a one-line text input.

mod intent;
mod reducer;
mod state;

pub use intent::PromptIntent;
pub use reducer::PromptReducer;
pub use state::{InputPurpose, PendingAction, PromptState};
