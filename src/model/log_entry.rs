use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of a log entry across snapshots: the JSON form of its `time` and
/// `message` values, `None` when the key is absent.
pub type DedupKey = (Option<String>, Option<String>);

/// One log line from the backend. The schema is open; key order is kept as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(Map<String, Value>);

impl LogEntry {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder used by callers that synthesise entries (tests, demos).
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn time(&self) -> Option<&Value> {
        self.0.get("time")
    }

    pub fn message(&self) -> Option<&Value> {
        self.0.get("message")
    }

    /// Message as display text, empty when absent.
    pub fn message_text(&self) -> String {
        self.message().map(value_text).unwrap_or_default()
    }

    pub fn dedup_key(&self) -> DedupKey {
        (
            self.time().map(Value::to_string),
            self.message().map(Value::to_string),
        )
    }

    /// `key: value - key: value`, the layout of the log panel.
    pub fn render_line(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value_text(value)))
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
