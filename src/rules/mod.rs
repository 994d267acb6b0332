//! Rule collection engine.
//!
//! The backend is authoritative: rules are never inserted or removed locally.
//! Every successful mutation is confirmed by refetching the whole collection.

use crate::client::ApiClient;
use crate::error::{ConsoleError, Result};
use crate::lifecycle::Liveness;
use crate::model::{Rule, RuleDraft, RuleId};
use crate::notify::{NotificationKind, Notify};
use futures::future::join_all;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const RULE_ADDED: &str = "Rule added successfully";
pub const RULE_DELETED: &str = "Rule deleted successfully";

/// Local view of the rule collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleState {
    pub rules: Vec<Rule>,
    /// True while a collection fetch is in flight. Advisory only.
    pub loading: bool,
    /// True while a create request is in flight.
    pub submitting: bool,
    pub error: Option<String>,
    pub selection: BTreeSet<RuleId>,
}

/// Owns the rule list and its mutations. Clones share the same state, so
/// operations may be spawned and may overlap.
#[derive(Clone)]
pub struct RuleEngine {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notify>,
    state: Arc<RwLock<RuleState>>,
    liveness: Liveness,
}

impl RuleEngine {
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notify>, liveness: Liveness) -> Self {
        Self {
            client,
            notifier,
            state: Arc::new(RwLock::new(RuleState::default())),
            liveness,
        }
    }

    pub fn snapshot(&self) -> RuleState {
        self.state.read().clone()
    }

    pub fn rules(&self) -> Vec<Rule> {
        self.state.read().rules.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn selection(&self) -> BTreeSet<RuleId> {
        self.state.read().selection.clone()
    }

    pub fn toggle_selected(&self, id: &RuleId) {
        let mut state = self.state.write();
        if !state.selection.remove(id) {
            state.selection.insert(id.clone());
        }
    }

    /// Select every rule, or clear the selection if all are already selected.
    pub fn toggle_all(&self) {
        let mut state = self.state.write();
        let all: BTreeSet<RuleId> = state.rules.iter().map(|rule| rule.id.clone()).collect();
        if !all.is_empty() && state.selection == all {
            state.selection.clear();
        } else {
            state.selection = all;
        }
    }

    pub fn clear_selection(&self) {
        self.state.write().selection.clear();
    }

    /// Required-field check, first missing field wins.
    pub fn validate(draft: &RuleDraft) -> Result<()> {
        draft.validate()
    }

    /// Replace the local collection with the backend's. On failure the
    /// previous collection is kept.
    pub async fn fetch_all(&self) -> Result<()> {
        self.state.write().loading = true;

        let result = self.client.list_rules().await;

        if !self.liveness.is_active() {
            debug!("console closed, discarding rule fetch result");
            return result.map(|_| ());
        }

        let mut state = self.state.write();
        state.loading = false;

        match result {
            Ok(rules) => {
                debug!(count = rules.len(), "rule collection refreshed");
                state.rules = rules;
                // Rows that vanished from the backend can no longer be checked.
                let RuleState { rules, selection, .. } = &mut *state;
                selection.retain(|id| rules.iter().any(|rule| &rule.id == id));
                state.error = None;
                Ok(())
            }
            Err(err) => {
                drop(state);
                warn!(error = %err, "failed to fetch rules");
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Validate and submit a new rule, then refetch.
    pub async fn create(&self, draft: &RuleDraft) -> Result<()> {
        if let Err(err) = Self::validate(draft) {
            debug!(error = %err, "rule draft rejected before submission");
            self.report(&err);
            return Err(err);
        }

        self.state.write().submitting = true;
        let result = self.client.create_rule(draft).await;

        if !self.liveness.is_active() {
            debug!("console closed, discarding create result");
            return result;
        }
        self.state.write().submitting = false;

        match result {
            Ok(()) => {
                info!(
                    source_ip = %draft.source_ip,
                    destination_ip = %draft.destination_ip,
                    "rule created"
                );
                self.notifier.notify(NotificationKind::Success, RULE_ADDED.to_string());
                // A refetch failure reports itself and replaces the banner.
                let _ = self.fetch_all().await;
                Ok(())
            }
            Err(err) => {
                let err = match err {
                    server @ ConsoleError::Server { .. } => ConsoleError::Create(Box::new(server)),
                    other => other,
                };
                warn!(error = %err, "failed to create rule");
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Delete every id concurrently. The batch fails as a whole if any delete
    /// fails; deletes that succeeded are not rolled back and no refetch happens.
    pub async fn delete_many(&self, ids: &[RuleId]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let results = join_all(ids.iter().map(|id| self.client.delete_rule(id))).await;

        let mut first_error = None;
        for (id, result) in ids.iter().zip(results) {
            if let Err(err) = result {
                warn!(rule_id = %id, error = %err, "rule delete failed");
                first_error.get_or_insert(err);
            }
        }
        let first_error = first_error.map(|err| ConsoleError::AggregateDelete(Box::new(err)));

        if !self.liveness.is_active() {
            debug!("console closed, discarding delete results");
            return first_error.map_or(Ok(()), Err);
        }

        match first_error {
            Some(err) => {
                self.report(&err);
                Err(err)
            }
            None => {
                info!(count = ids.len(), "rules deleted");
                self.state.write().selection.clear();
                self.notifier.notify(NotificationKind::Success, RULE_DELETED.to_string());
                let _ = self.fetch_all().await;
                Ok(())
            }
        }
    }

    pub async fn delete_selected(&self) -> Result<()> {
        let ids: Vec<RuleId> = self.selection().into_iter().collect();
        self.delete_many(&ids).await
    }

    fn report(&self, err: &ConsoleError) {
        let message = err.to_string();
        self.state.write().error = Some(message.clone());
        self.notifier.notify(NotificationKind::Error, message);
    }
}
