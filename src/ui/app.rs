use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use tokio::sync::mpsc;

use crate::article::Article;
use crate::clipboard::{self, ClipboardError};
use crate::config::{Config, UiConfig};
use crate::refresh::RefreshTimer;
use crate::scrape::{ScrapeJob, ScrapeOutcome, ScrapeProgress};
use crate::stats::{recent_previews, ArticlePreview, Overview, StatsSnapshot};
use crate::storage::{local_timestamp, Activity};
use crate::ui::articles::{ArticleIntent, ArticleListState, ArticleReducer, SortKey};
use crate::ui::events::ApiEvent;
use crate::ui::mvi::Reducer;
use crate::ui::prompt::{InputPurpose, PendingAction, PromptIntent, PromptReducer, PromptState};

const DEBUG_STATUS_TTL: Duration = Duration::from_secs(15);
const RECENT_ERROR: &str = "Error loading recent articles. Please try again later.";
const DELETE_ALL_PROMPT: &str =
    "Are you sure you want to delete all articles? This action cannot be undone.";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum View {
    #[default]
    Dashboard,
    Articles,
    Scrape,
    Stats,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Articles, View::Scrape, View::Stats];

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Articles => "Articles",
            View::Scrape => "Scrape",
            View::Stats => "Statistics",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Articles => 1,
            View::Scrape => 2,
            View::Stats => 3,
        }
    }

    /// `'1'..='4'` to a view.
    pub fn from_digit(ch: char) -> Option<View> {
        let index = ch.to_digit(10)? as usize;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn next(&self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Auto-refresh period while this view is shown. Articles has none: a
    /// reload returns the list to page 1.
    pub fn refresh_interval(&self, ui: &UiConfig) -> Option<Duration> {
        match self {
            View::Dashboard => Some(ui.refresh_interval()),
            View::Stats => Some(ui.stats_refresh_interval()),
            View::Articles | View::Scrape => None,
        }
    }
}

#[derive(Debug)]
pub enum UiCommand {
    LoadArticles,
    LoadDashboard,
    LoadStats,
    Count,
    DeleteAll,
    DebugDump,
    Scrape(ScrapeJob),
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Starts the periodic refresh for a view; `None` when the view has none.
pub type RefreshSpawner = Arc<dyn Fn(View) -> Option<RefreshTimer> + Send + Sync>;

/// Reads the persisted local state.
pub type LocalStateProvider = Arc<dyn Fn() -> LocalSnapshot + Send + Sync>;

/// Copy of the local store taken for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalSnapshot {
    pub last_scraped: Option<String>,
    pub activities: Vec<Activity>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Transient message in the footer.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    expires_at: Instant,
}

impl StatusMessage {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub overview: Option<Overview>,
    pub recent: Vec<ArticlePreview>,
    pub recent_error: Option<String>,
    pub loaded: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ScrapeStatus {
    pub running: Option<ScrapeJob>,
    pub progress: Option<ScrapeProgress>,
}

/// Macro dispatching an intent through a reducer into an `App` field.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    view: View,
    status_ttl: Duration,
    /// Article list (MVI pattern).
    articles: ArticleListState,
    /// Confirm and input dialogs (MVI pattern).
    prompt: PromptState,
    dashboard: DashboardState,
    stats: Option<StatsSnapshot>,
    announce_stats_refresh: bool,
    scrape: ScrapeStatus,
    local: LocalSnapshot,
    status: Option<StatusMessage>,
    last_updated: Option<String>,
    export_dir: PathBuf,
    command_sender: Option<UiCommandSender>,
    refresh_timer: Option<RefreshTimer>,
    refresh_spawner: Option<RefreshSpawner>,
    local_state_provider: Option<LocalStateProvider>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            view: View::default(),
            status_ttl: config.ui.status_ttl(),
            articles: ArticleListState::with_page_size(config.ui.page_size),
            prompt: PromptState::default(),
            dashboard: DashboardState::default(),
            stats: None,
            announce_stats_refresh: false,
            scrape: ScrapeStatus::default(),
            local: LocalSnapshot::default(),
            status: None,
            last_updated: None,
            export_dir: PathBuf::from("."),
            command_sender: None,
            refresh_timer: None,
            refresh_spawner: None,
            local_state_provider: None,
        }
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.command_sender = Some(sender);
    }

    pub fn set_refresh_spawner(&mut self, spawner: RefreshSpawner) {
        self.refresh_spawner = Some(spawner);
    }

    pub fn set_local_state_provider(&mut self, provider: LocalStateProvider) {
        self.local_state_provider = Some(provider);
        self.reload_local_state();
    }

    pub fn set_export_dir(&mut self, dir: impl Into<PathBuf>) {
        self.export_dir = dir.into();
    }

    /// Loads the first view and starts its refresh timer.
    pub fn start(&mut self) {
        self.enter_view(self.view);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
        self.refresh_timer = None;
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn articles(&self) -> &ArticleListState {
        &self.articles
    }

    pub fn prompt(&self) -> &PromptState {
        &self.prompt
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn stats(&self) -> Option<&StatsSnapshot> {
        self.stats.as_ref()
    }

    pub fn scrape_status(&self) -> &ScrapeStatus {
        &self.scrape
    }

    pub fn local(&self) -> &LocalSnapshot {
        &self.local
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_timer.as_ref().map(RefreshTimer::interval)
    }

    pub fn switch_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        self.enter_view(view);
    }

    fn enter_view(&mut self, view: View) {
        // Dropping the old timer cancels it.
        self.refresh_timer = None;
        self.view = view;
        self.load_view(view);
        self.refresh_timer = self.refresh_spawner.as_ref().and_then(|spawn| spawn(view));
    }

    fn load_view(&mut self, view: View) {
        match view {
            View::Dashboard => {
                self.reload_local_state();
                self.send_command(UiCommand::LoadDashboard);
            }
            View::Articles => {
                self.send_command(UiCommand::LoadArticles);
            }
            View::Scrape => self.reload_local_state(),
            View::Stats => {
                self.send_command(UiCommand::LoadStats);
            }
        }
    }

    /// Periodic refresh. Ticks for a view no longer shown, or one without a
    /// timer, are ignored.
    pub fn on_refresh(&mut self, view: View) {
        if view != self.view || !matches!(view, View::Dashboard | View::Stats) {
            return;
        }
        tracing::debug!(?view, "auto refresh");
        self.load_view(view);
    }

    pub fn on_tick(&mut self) {
        self.expire_status(Instant::now());
    }

    pub fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.set_status_for(text, kind, self.status_ttl);
    }

    fn set_status_for(&mut self, text: impl Into<String>, kind: StatusKind, ttl: Duration) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            expires_at: Instant::now() + ttl,
        });
    }

    fn reload_local_state(&mut self) {
        if let Some(provider) = &self.local_state_provider {
            self.local = provider();
        }
    }

    fn send_command(&mut self, command: UiCommand) -> bool {
        let Some(sender) = &self.command_sender else {
            return false;
        };
        match sender.try_send(command) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to queue ui command");
                self.set_status("Busy, please try again", StatusKind::Error);
                false
            }
        }
    }

    pub fn on_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::ArticlesLoaded(result) => self.on_articles_loaded(result),
            ApiEvent::DashboardLoaded { count, articles } => {
                self.dashboard.loaded = true;
                match count {
                    Ok(total) => {
                        self.dashboard.overview =
                            Some(Overview::new(total, self.local.last_scraped.as_deref()));
                    }
                    Err(message) => {
                        self.set_status(
                            format!("Error loading statistics: {}", message),
                            StatusKind::Error,
                        );
                    }
                }
                match articles {
                    Ok(articles) => {
                        self.dashboard.recent = recent_previews(&articles);
                        self.dashboard.recent_error = None;
                    }
                    Err(message) => {
                        tracing::warn!(%message, "recent articles unavailable");
                        self.dashboard.recent_error = Some(RECENT_ERROR.to_string());
                    }
                }
                self.last_updated = Some(local_timestamp());
            }
            ApiEvent::StatsLoaded(snapshot) => {
                self.stats = Some(*snapshot);
                self.last_updated = Some(local_timestamp());
                if std::mem::take(&mut self.announce_stats_refresh) {
                    self.set_status("Statistics refreshed successfully!", StatusKind::Success);
                }
            }
            ApiEvent::Counted(Ok(total)) => {
                self.set_status(format!("Total articles in database: {}", total), StatusKind::Info);
            }
            ApiEvent::Counted(Err(message)) => {
                self.set_status(format!("Error getting count: {}", message), StatusKind::Error);
            }
            ApiEvent::Deleted(Ok(message)) => {
                dispatch_mvi!(self, articles, ArticleReducer, ArticleIntent::Cleared);
                self.set_status(message.trim(), StatusKind::Success);
            }
            ApiEvent::Deleted(Err(message)) => {
                self.set_status(format!("Error deleting articles: {}", message), StatusKind::Error);
            }
            ApiEvent::ScrapeProgress(progress) => {
                self.scrape.progress = Some(progress);
            }
            ApiEvent::ScrapeFinished(result) => self.on_scrape_finished(result),
            ApiEvent::DebugDump(Ok(text)) => {
                self.set_status_for(text.trim_end(), StatusKind::Info, DEBUG_STATUS_TTL);
            }
            ApiEvent::DebugDump(Err(message)) => {
                self.set_status(format!("Error getting debug info: {}", message), StatusKind::Error);
            }
        }
    }

    fn on_articles_loaded(&mut self, result: Result<Vec<Article>, String>) {
        match result {
            Ok(articles) => {
                dispatch_mvi!(self, articles, ArticleReducer, ArticleIntent::Loaded { articles });
                self.last_updated = Some(local_timestamp());
            }
            Err(message) => {
                self.set_status(format!("Error loading articles: {}", message), StatusKind::Error);
                dispatch_mvi!(
                    self,
                    articles,
                    ArticleReducer,
                    ArticleIntent::LoadFailed { message }
                );
            }
        }
    }

    fn on_scrape_finished(&mut self, result: Result<ScrapeOutcome, String>) {
        self.scrape.running = None;
        match result {
            Ok(outcome) => {
                self.set_status(outcome.message.trim(), StatusKind::Success);
                self.reload_local_state();
                if matches!(self.view, View::Dashboard | View::Articles) {
                    self.load_view(self.view);
                }
            }
            Err(message) => {
                self.scrape.progress = None;
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    // Article view actions.

    pub fn reload(&mut self) {
        self.load_view(self.view);
    }

    pub fn cycle_sort(&mut self) {
        let key = SortKey::next(self.articles.sort_key());
        dispatch_mvi!(self, articles, ArticleReducer, ArticleIntent::Sort { key });
        self.set_status(format!("Sorted by {}", key.label()), StatusKind::Info);
    }

    pub fn open_search(&mut self) {
        let initial = self.articles.search_term().to_string();
        self.dispatch_prompt(PromptIntent::Input {
            purpose: InputPurpose::Search,
            initial,
        });
    }

    pub fn next_page(&mut self) {
        dispatch_mvi!(self, articles, ArticleReducer, ArticleIntent::NextPage);
    }

    pub fn previous_page(&mut self) {
        dispatch_mvi!(self, articles, ArticleReducer, ArticleIntent::PreviousPage);
    }

    pub fn select_next(&mut self) {
        dispatch_mvi!(self, articles, ArticleReducer, ArticleIntent::SelectNext);
    }

    pub fn select_previous(&mut self) {
        dispatch_mvi!(self, articles, ArticleReducer, ArticleIntent::SelectPrevious);
    }

    pub fn copy_selected_link(&mut self) {
        let link = self.articles.selected().and_then(|a| a.link.clone());
        match clipboard::copy_link(link.as_deref()) {
            Ok(()) => self.set_status("Link copied to clipboard!", StatusKind::Success),
            Err(ClipboardError::NoLink) => {
                self.set_status("Selected article has no link", StatusKind::Error)
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                self.set_status("Failed to copy link", StatusKind::Error);
            }
        }
    }

    pub fn request_delete_all(&mut self) {
        self.dispatch_prompt(PromptIntent::Confirm {
            action: PendingAction::DeleteAll,
            message: DELETE_ALL_PROMPT.to_string(),
        });
    }

    pub fn request_count(&mut self) {
        self.send_command(UiCommand::Count);
    }

    // Scrape view actions.

    /// Starts `job`, asking first when it is a multi-page job.
    pub fn request_scrape(&mut self, job: ScrapeJob) {
        match job.confirmation_prompt() {
            Some(message) => self.dispatch_prompt(PromptIntent::Confirm {
                action: PendingAction::Scrape(job),
                message,
            }),
            None => self.start_scrape(job),
        }
    }

    fn start_scrape(&mut self, job: ScrapeJob) {
        if self.send_command(UiCommand::Scrape(job)) {
            self.scrape.running = Some(job);
            self.scrape.progress = Some(ScrapeProgress {
                completed: 0,
                total: job.request_count(),
                label: job.start_message(),
            });
            self.set_status(job.start_message(), StatusKind::Info);
        }
    }

    pub fn open_page_prompt(&mut self) {
        self.dispatch_prompt(PromptIntent::Input {
            purpose: InputPurpose::ScrapePage,
            initial: String::new(),
        });
    }

    pub fn open_range_prompt(&mut self) {
        self.dispatch_prompt(PromptIntent::Input {
            purpose: InputPurpose::ScrapeRange,
            initial: String::new(),
        });
    }

    // Stats view actions.

    pub fn refresh_stats(&mut self) {
        if self.send_command(UiCommand::LoadStats) {
            self.announce_stats_refresh = true;
        }
    }

    pub fn request_debug_dump(&mut self) {
        self.send_command(UiCommand::DebugDump);
    }

    pub fn export_stats(&mut self) {
        let Some(stats) = &self.stats else {
            self.set_status("No statistics loaded yet", StatusKind::Error);
            return;
        };
        let written = stats
            .to_export()
            .write_to(&self.export_dir, Local::now().date_naive());
        match written {
            Ok(path) => self.set_status(
                format!("Statistics exported successfully! ({})", path.display()),
                StatusKind::Success,
            ),
            Err(e) => {
                tracing::warn!(error = %e, "stats export failed");
                self.set_status(format!("Export failed: {}", e), StatusKind::Error);
            }
        }
    }

    // Prompt handling.

    pub fn dispatch_prompt(&mut self, intent: PromptIntent) {
        dispatch_mvi!(self, prompt, PromptReducer, intent);
    }

    pub fn cancel_prompt(&mut self) {
        self.dispatch_prompt(PromptIntent::Close);
    }

    /// Runs the confirmed action, if a confirmation is showing.
    pub fn confirm_prompt(&mut self) {
        let PromptState::Confirm { action, .. } = &self.prompt else {
            return;
        };
        let action = *action;
        self.dispatch_prompt(PromptIntent::Close);
        match action {
            PendingAction::DeleteAll => {
                self.send_command(UiCommand::DeleteAll);
            }
            PendingAction::Scrape(job) => self.start_scrape(job),
        }
    }

    /// Submits the input prompt; invalid input keeps it open with an error.
    pub fn submit_prompt(&mut self) {
        let PromptState::Input {
            purpose, buffer, ..
        } = &self.prompt
        else {
            return;
        };
        let (purpose, buffer) = (*purpose, buffer.clone());
        match purpose {
            InputPurpose::Search => {
                self.dispatch_prompt(PromptIntent::Close);
                dispatch_mvi!(
                    self,
                    articles,
                    ArticleReducer,
                    ArticleIntent::Filter { term: buffer }
                );
            }
            InputPurpose::ScrapePage | InputPurpose::ScrapeRange => {
                let parsed = if purpose == InputPurpose::ScrapePage {
                    ScrapeJob::parse_page(&buffer)
                } else {
                    ScrapeJob::parse_range(&buffer)
                };
                match parsed {
                    Ok(job) => {
                        self.dispatch_prompt(PromptIntent::Close);
                        self.request_scrape(job);
                    }
                    Err(e) => self.dispatch_prompt(PromptIntent::Reject {
                        message: e.user_message(),
                    }),
                }
            }
        }
    }
}
