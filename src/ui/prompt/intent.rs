use crate::ui::mvi::Intent;

use super::state::{InputPurpose, PendingAction};

#[derive(Debug, Clone)]
pub enum PromptIntent {
    Confirm {
        action: PendingAction,
        message: String,
    },
    /// Open a text prompt pre-filled with `initial`.
    Input {
        purpose: InputPurpose,
        initial: String,
    },
    Type(char),
    Backspace,
    /// Submitted text was invalid; keep the prompt open with `message`.
    Reject { message: String },
    Close,
}

impl Intent for PromptIntent {}
