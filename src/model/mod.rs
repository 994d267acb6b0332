pub mod log_entry;
pub mod rule;

pub use log_entry::{DedupKey, LogEntry};
pub use rule::{Rule, RuleDraft, RuleField, RuleId};

#[cfg(test)]
pub(crate) use rule::sample_draft;
