//! Cancellable periodic refresh.
//!
//! A [`RefreshTimer`] owns one tokio task that calls `on_tick` every
//! `interval`. The first tick comes one full interval after spawning.
//! Cancelling, or dropping the timer, stops the task before its next tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

#[derive(Clone)]
struct CancelFlag {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelFlag {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    async fn wait(&self) {
        // Register before checking the flag so a concurrent cancel() is not lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

pub struct RefreshTimer {
    flag: CancelFlag,
    interval: Duration,
}

impl RefreshTimer {
    /// Spawns the timer on `handle`.
    pub fn spawn<F>(handle: &Handle, interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let flag = CancelFlag::new();
        let task_flag = flag.clone();
        handle.spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = task_flag.wait() => break,
                    _ = ticker.tick() => {
                        if task_flag.is_cancelled() {
                            break;
                        }
                        on_tick();
                    }
                }
            }
            tracing::trace!(?interval, "refresh timer stopped");
        });
        Self { flag, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cancel(&self) {
        self.flag.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.is_cancelled()
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.flag.cancel();
    }
}
