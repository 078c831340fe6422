//! Periodic removal of expired threads.

use super::store::ThreadStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Background task running [`ThreadStore::cleanup`] on a fixed period.
pub struct ThreadSweeper;

impl ThreadSweeper {
    /// Spawn the sweep loop. The first sweep runs one `period` after start;
    /// the task ends when `shutdown` is cancelled.
    pub fn spawn(
        store: Arc<ThreadStore>,
        period: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        debug!("Thread sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = store.cleanup();
                        if removed > 0 {
                            info!(removed, "Swept expired threads");
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_expired_threads() {
        let store = Arc::new(ThreadStore::with_limits(10, Duration::ZERO));
        store.create_thread("chat");
        std::thread::sleep(Duration::from_millis(5));

        let shutdown = CancellationToken::new();
        let handle = ThreadSweeper::spawn(
            Arc::clone(&store),
            Duration::from_secs(60),
            shutdown.clone(),
        );

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(store.stats().thread_count, 0);

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_on_shutdown() {
        let store = Arc::new(ThreadStore::with_limits(10, Duration::from_secs(3600)));
        let shutdown = CancellationToken::new();
        let handle = ThreadSweeper::spawn(store, Duration::from_secs(900), shutdown.clone());
        shutdown.cancel();
        handle.await.unwrap();
    }
}
