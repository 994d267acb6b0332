//! Log tail engine.
//!
//! Tailing is approximated by polling: each poll returns the backend's full
//! snapshot, which replaces the local list only when it holds entries not
//! seen before.

pub mod tailer;

pub use tailer::{spawn, TailHandle};

use crate::client::ApiClient;
use crate::error::Result;
use crate::lifecycle::Liveness;
use crate::model::{DedupKey, LogEntry};
use crate::notify::{NotificationKind, Notify};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default interval between update polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The backend reported nothing new.
    NoContent,
    /// A snapshot arrived but held no unseen entries; local state untouched.
    Unchanged,
    /// The local list was replaced by the snapshot.
    Updated {
        fresh: Vec<LogEntry>,
        newest_message: String,
    },
    /// The console was closed while the request was in flight.
    Discarded,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogState {
    pub entries: Vec<LogEntry>,
    /// Most recent fetch failure, shown as a diagnostic.
    pub last_error: Option<String>,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct LogTailEngine {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notify>,
    state: Arc<RwLock<LogState>>,
    liveness: Liveness,
}

impl LogTailEngine {
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notify>, liveness: Liveness) -> Self {
        Self {
            client,
            notifier,
            state: Arc::new(RwLock::new(LogState::default())),
            liveness,
        }
    }

    pub fn snapshot(&self) -> LogState {
        self.state.read().clone()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.state.read().entries.clone()
    }

    /// One-shot startup fetch. Failures are logged and leave the list empty.
    pub async fn load_initial(&self) -> Result<usize> {
        let result = self.client.initial_logs().await;

        if !self.liveness.is_active() {
            debug!("console closed, discarding initial logs");
            return result.map(|entries| entries.len());
        }

        let mut state = self.state.write();
        match result {
            Ok(entries) => {
                let count = entries.len();
                info!(count, "initial log snapshot loaded");
                state.entries = entries;
                state.last_error = None;
                state.last_update = Some(Utc::now());
                Ok(count)
            }
            Err(err) => {
                error!(error = %err, "error fetching logs");
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch the current snapshot and apply it if it holds unseen entries.
    pub async fn poll(&self) -> Result<PollOutcome> {
        let result = self.client.updated_logs().await;

        if !self.liveness.is_active() {
            debug!("console closed, discarding log poll");
            return Ok(PollOutcome::Discarded);
        }

        match result {
            Ok(None) => {
                debug!("no new logs");
                Ok(PollOutcome::NoContent)
            }
            Ok(Some(snapshot)) => Ok(self.apply_snapshot(snapshot)),
            Err(err) => {
                warn!(error = %err, "error fetching updated logs");
                self.state.write().last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Compare `snapshot` against the held list by (time, message). Any unseen
    /// entry replaces the whole list and raises an alert for the last one.
    pub fn apply_snapshot(&self, snapshot: Vec<LogEntry>) -> PollOutcome {
        let mut state = self.state.write();
        state.last_error = None;

        let known: HashSet<DedupKey> = state.entries.iter().map(LogEntry::dedup_key).collect();
        let fresh: Vec<LogEntry> = snapshot
            .iter()
            .filter(|entry| !known.contains(&entry.dedup_key()))
            .cloned()
            .collect();

        let Some(newest) = fresh.last() else {
            return PollOutcome::Unchanged;
        };
        let newest_message = newest.message_text();

        debug!(fresh = fresh.len(), total = snapshot.len(), "log snapshot has new entries");
        state.entries = snapshot;
        state.last_update = Some(Utc::now());
        drop(state);

        if !newest_message.is_empty() {
            self.notifier
                .notify(NotificationKind::NewLog, newest_message.clone());
        }

        PollOutcome::Updated { fresh, newest_message }
    }
}
