//! Runs [`UiCommand`]s against the backend off the UI thread.
//!
//! Each command gets its own task, so slow calls never block the UI and
//! repeated commands may overlap. Whichever response lands last wins.

use std::sync::mpsc::Sender;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::api::NewsClient;
use crate::scrape::ScrapeRunner;
use crate::stats::StatsSnapshot;
use crate::storage::SharedStore;
use crate::ui::app::{UiCommand, UiCommandSender};
use crate::ui::events::{ApiEvent, AppEvent};

const COMMAND_QUEUE: usize = 32;

/// Backend handles the worker needs.
#[derive(Clone)]
pub struct Worker {
    pub client: NewsClient,
    pub runner: ScrapeRunner,
    pub store: SharedStore,
}

impl Worker {
    /// Spawns the dispatch loop on `handle`; results are posted to `events`.
    pub fn spawn(self, handle: &Handle, events: Sender<AppEvent>) -> UiCommandSender {
        let (tx, mut rx) = mpsc::channel::<UiCommand>(COMMAND_QUEUE);
        let task_handle = handle.clone();
        handle.spawn(async move {
            while let Some(command) = rx.recv().await {
                tracing::debug!(?command, "ui command");
                let worker = self.clone();
                let events = events.clone();
                task_handle.spawn(async move {
                    worker.execute(command, events).await;
                });
            }
        });
        tx
    }

    async fn execute(self, command: UiCommand, events: Sender<AppEvent>) {
        let post = |event: ApiEvent| {
            let _ = events.send(AppEvent::Api(event));
        };
        match command {
            UiCommand::LoadArticles => {
                let result = self.client.list_articles().await;
                post(ApiEvent::ArticlesLoaded(result.map_err(|e| e.user_message())));
            }
            UiCommand::LoadDashboard => {
                let (count, articles) =
                    tokio::join!(self.client.count(), self.client.list_articles());
                post(ApiEvent::DashboardLoaded {
                    count: count.map_err(|e| e.user_message()),
                    articles: articles.map_err(|e| e.user_message()),
                });
            }
            UiCommand::LoadStats => {
                let snapshot = StatsSnapshot::collect(&self.client, &self.store).await;
                post(ApiEvent::StatsLoaded(Box::new(snapshot)));
            }
            UiCommand::Count => {
                let result = self.client.count().await;
                post(ApiEvent::Counted(result.map_err(|e| e.user_message())));
            }
            UiCommand::DeleteAll => {
                let result = self.client.delete_all().await;
                post(ApiEvent::Deleted(result.map_err(|e| e.user_message())));
            }
            UiCommand::DebugDump => {
                let result = self.client.debug_dump().await;
                post(ApiEvent::DebugDump(result.map_err(|e| e.user_message())));
            }
            UiCommand::Scrape(job) => {
                let result = self
                    .runner
                    .run(job, |progress| post(ApiEvent::ScrapeProgress(progress)))
                    .await;
                post(ApiEvent::ScrapeFinished(result.map_err(|e| e.user_message())));
            }
        }
    }
}
