// Polling file watcher.
// Emits a change callback whenever the data file's fingerprint moves.

use std::path::PathBuf;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::file;

/// Default poll interval for the data file.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Watches one file by polling its modification time and length.
#[derive(Debug, Clone)]
pub struct FileWatcher {
    path: PathBuf,
    interval: Duration,
}

impl FileWatcher {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval: interval.max(MIN_POLL_INTERVAL),
        }
    }

    /// Start polling on a background task.
    ///
    /// The first poll only records a baseline. After that `on_change` runs once per
    /// observed difference, including the file appearing or disappearing.
    pub fn spawn<F>(self, on_change: F) -> JoinHandle<()>
    where
        F: Fn() + Send + 'static,
    {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut last = file::fingerprint(&self.path).await;
            loop {
                ticker.tick().await;
                let current = file::fingerprint(&self.path).await;
                if current != last {
                    debug!(path = %self.path.display(), "watched file changed");
                    last = current;
                    on_change();
                }
            }
        })
    }
}
