use crate::client::ApiClient;
use crate::config::Config;
use crate::lifecycle::Liveness;
use crate::logs::{self, LogTailEngine, TailHandle};
use crate::notify::{NotificationController, Notify};
use crate::rules::RuleEngine;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything the interactive view needs: both engines sharing one banner
/// and one liveness guard.
pub struct Console {
    pub rules: RuleEngine,
    pub logs: LogTailEngine,
    pub banner: NotificationController,
    liveness: Liveness,
    poll_interval: Duration,
    tail: Option<TailHandle>,
}

impl Console {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(ApiClient::from_config(&config.backend)?);
        Ok(Self::new(
            client,
            NotificationController::new(config.logs.alert_hide_after()),
            config.logs.poll_interval(),
        ))
    }

    pub fn new(client: Arc<ApiClient>, banner: NotificationController, poll_interval: Duration) -> Self {
        let liveness = Liveness::new();
        let notifier: Arc<dyn Notify> = Arc::new(banner.clone());

        Self {
            rules: RuleEngine::new(client.clone(), notifier.clone(), liveness.clone()),
            logs: LogTailEngine::new(client, notifier, liveness.clone()),
            banner,
            liveness,
            poll_interval,
            tail: None,
        }
    }

    /// Start log tailing and the first rule fetch.
    pub fn start(&mut self) {
        if self.tail.is_some() {
            return;
        }

        info!(poll_interval_ms = self.poll_interval.as_millis() as u64, "console started");
        self.tail = Some(logs::spawn(self.logs.clone(), self.poll_interval));

        let rules = self.rules.clone();
        tokio::spawn(async move {
            let _ = rules.fetch_all().await;
        });
    }

    pub fn is_active(&self) -> bool {
        self.liveness.is_active()
    }

    /// Tear down: stop polling, cancel the alert timer and drop late results.
    pub fn shutdown(&mut self) {
        self.liveness.deactivate();
        if let Some(tail) = self.tail.take() {
            tail.stop();
        }
        self.banner.teardown();
        info!("console stopped");
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        if self.is_active() {
            self.shutdown();
        }
    }
}
