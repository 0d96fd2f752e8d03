use crate::scrape::ScrapeJob;
use crate::ui::mvi::UiState;

/// Action waiting on a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    DeleteAll,
    Scrape(ScrapeJob),
}

/// What the text typed into an input prompt is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    Search,
    ScrapePage,
    ScrapeRange,
}

impl InputPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            InputPurpose::Search => "Search articles",
            InputPurpose::ScrapePage => "Scrape page (1-10)",
            InputPurpose::ScrapeRange => "Scrape range (e.g. 2-5)",
        }
    }

    /// Characters accepted by the prompt; searches take anything printable.
    pub fn accepts(&self, ch: char) -> bool {
        match self {
            InputPurpose::Search => !ch.is_control(),
            InputPurpose::ScrapePage => ch.is_ascii_digit(),
            InputPurpose::ScrapeRange => ch.is_ascii_digit() || ch == '-' || ch == ' ',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PromptState {
    #[default]
    Hidden,
    Confirm {
        action: PendingAction,
        message: String,
    },
    Input {
        purpose: InputPurpose,
        buffer: String,
        /// Validation error from the last submit; cleared on edit.
        error: Option<String>,
    },
}

impl UiState for PromptState {}

impl PromptState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}
