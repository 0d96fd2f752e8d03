use crate::ui::mvi::Reducer;

use super::intent::PromptIntent;
use super::state::PromptState;

pub struct PromptReducer;

impl Reducer for PromptReducer {
    type State = PromptState;
    type Intent = PromptIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PromptIntent::Confirm { action, message } => PromptState::Confirm { action, message },
            PromptIntent::Input { purpose, initial } => PromptState::Input {
                purpose,
                buffer: initial,
                error: None,
            },
            PromptIntent::Close => PromptState::Hidden,
            PromptIntent::Type(ch) => match state {
                PromptState::Input {
                    purpose,
                    mut buffer,
                    error,
                } => {
                    if !purpose.accepts(ch) {
                        return PromptState::Input {
                            purpose,
                            buffer,
                            error,
                        };
                    }
                    buffer.push(ch);
                    PromptState::Input {
                        purpose,
                        buffer,
                        error: None,
                    }
                }
                other => other,
            },
            PromptIntent::Backspace => match state {
                PromptState::Input {
                    purpose,
                    mut buffer,
                    ..
                } => {
                    buffer.pop();
                    PromptState::Input {
                        purpose,
                        buffer,
                        error: None,
                    }
                }
                other => other,
            },
            PromptIntent::Reject { message } => match state {
                PromptState::Input {
                    purpose, buffer, ..
                } => PromptState::Input {
                    purpose,
                    buffer,
                    error: Some(message),
                },
                other => other,
            },
        }
    }
}
