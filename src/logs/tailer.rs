use super::{LogTailEngine, PollOutcome};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Handle to a running tail task
pub struct TailHandle {
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl TailHandle {
    /// Stop polling. An in-flight poll is left to finish; its result is
    /// dropped by the engine once the console is no longer active.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task to exit after `stop`.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Load the initial snapshot, then poll every `period` until stopped.
pub fn spawn(engine: LogTailEngine, period: Duration) -> TailHandle {
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

    let task = tokio::spawn(async move {
        tokio::select! {
            _ = engine.load_initial() => {}
            _ = shutdown_rx.recv() => {
                debug!("log tail stopped before initial load completed");
                return;
            }
        }

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match engine.poll().await {
                        Ok(PollOutcome::Updated { fresh, .. }) => {
                            debug!(fresh = fresh.len(), "log view updated");
                        }
                        Ok(PollOutcome::Discarded) => break,
                        Ok(_) => {}
                        // Already recorded by the engine.
                        Err(_) => {}
                    }
                }
                _ = shutdown_rx.recv() => break,
            }
        }

        info!("log tail stopped");
    });

    TailHandle { shutdown_tx, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockReply, MockTransport};
    use crate::client::{ApiClient, ApiPaths};
    use crate::lifecycle::Liveness;
    use crate::notify::NotificationController;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    const UPDATES: &str = "/api-logs/updated-logs";

    fn engine(mock: &Arc<MockTransport>) -> LogTailEngine {
        let client = Arc::new(ApiClient::new(mock.clone(), ApiPaths::default()));
        LogTailEngine::new(client, Arc::new(NotificationController::default()), Liveness::new())
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_interval_after_initial_load() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            Method::GET,
            "/api-logs/initial-logs",
            MockReply::json(200, json!([{ "time": "1", "message": "a" }])),
        );
        mock.on(
            Method::GET,
            UPDATES,
            MockReply::json(200, json!([{ "time": "1", "message": "a" }, { "time": "2", "message": "b" }])),
        );
        let engine = engine(&mock);
        let handle = spawn(engine.clone(), Duration::from_millis(10_000));

        tokio::time::sleep(Duration::from_millis(9_900)).await;
        assert_eq!(engine.entries().len(), 1);
        assert_eq!(mock.call_count(&Method::GET, UPDATES), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(mock.call_count(&Method::GET, UPDATES), 1);
        assert_eq!(engine.entries().len(), 2);

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        tokio::task::yield_now().await;
        assert_eq!(mock.call_count(&Method::GET, UPDATES), 2);

        handle.stop();
        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_polling() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::GET, "/api-logs/initial-logs", MockReply::json(200, json!([])));
        mock.on(Method::GET, UPDATES, MockReply::status(204));
        let handle = spawn(engine(&mock), Duration::from_millis(1_000));

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        let polls = mock.call_count(&Method::GET, UPDATES);
        assert_eq!(polls, 2);

        handle.stop();
        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert!(handle.is_finished());
        assert_eq!(mock.call_count(&Method::GET, UPDATES), polls);
    }
}
