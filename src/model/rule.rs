use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned rule identifier. The backend may send it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RuleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        flexible_string(deserializer).map(RuleId)
    }
}

/// Editable fields of a rule, in the order they are checked on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleField {
    SourceIp,
    DestinationIp,
    SourcePort,
    DestinationPort,
    RateLimit,
    LimitWindow,
    Protocol,
    State,
    Action,
    LogAction,
}

impl RuleField {
    /// Fields that must be non-empty before a draft is submitted.
    pub const REQUIRED: [RuleField; 9] = [
        RuleField::SourceIp,
        RuleField::DestinationIp,
        RuleField::SourcePort,
        RuleField::DestinationPort,
        RuleField::RateLimit,
        RuleField::LimitWindow,
        RuleField::Protocol,
        RuleField::State,
        RuleField::Action,
    ];

    /// Display order used by the add-rule form and the rules table.
    pub const FORM_ORDER: [RuleField; 10] = [
        RuleField::SourceIp,
        RuleField::DestinationIp,
        RuleField::SourcePort,
        RuleField::DestinationPort,
        RuleField::Protocol,
        RuleField::State,
        RuleField::Action,
        RuleField::RateLimit,
        RuleField::LimitWindow,
        RuleField::LogAction,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleField::SourceIp => "source_ip",
            RuleField::DestinationIp => "destination_ip",
            RuleField::SourcePort => "source_port",
            RuleField::DestinationPort => "destination_port",
            RuleField::RateLimit => "rate_limit",
            RuleField::LimitWindow => "limit_window",
            RuleField::Protocol => "protocol",
            RuleField::State => "state",
            RuleField::Action => "action",
            RuleField::LogAction => "log_action",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RuleField::SourceIp => "Source IP",
            RuleField::DestinationIp => "Destination IP",
            RuleField::SourcePort => "Source Port",
            RuleField::DestinationPort => "Destination Port",
            RuleField::RateLimit => "Rate Limit",
            RuleField::LimitWindow => "Limit Window",
            RuleField::Protocol => "Protocol",
            RuleField::State => "State",
            RuleField::Action => "Action",
            RuleField::LogAction => "Log Action",
        }
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rule as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    #[serde(default, deserialize_with = "flexible_string")]
    pub source_ip: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub destination_ip: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub source_port: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub destination_port: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub protocol: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub state: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub action: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub rate_limit: String,
    #[serde(default, deserialize_with = "flexible_string")]
    pub limit_window: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub log_action: bool,
}

impl Rule {
    /// Cell text for a table column.
    pub fn field_text(&self, field: RuleField) -> String {
        match field {
            RuleField::SourceIp => self.source_ip.clone(),
            RuleField::DestinationIp => self.destination_ip.clone(),
            RuleField::SourcePort => self.source_port.clone(),
            RuleField::DestinationPort => self.destination_port.clone(),
            RuleField::RateLimit => self.rate_limit.clone(),
            RuleField::LimitWindow => self.limit_window.clone(),
            RuleField::Protocol => self.protocol.clone(),
            RuleField::State => self.state.clone(),
            RuleField::Action => self.action.clone(),
            RuleField::LogAction => if self.log_action { "True" } else { "False" }.to_string(),
        }
    }

    /// True when every submitted field of `draft` is reflected by this rule.
    pub fn matches_draft(&self, draft: &RuleDraft) -> bool {
        RuleField::REQUIRED
            .iter()
            .all(|field| self.field_text(*field) == draft.get(*field))
            && draft.log_action.map_or(true, |v| v == self.log_action)
    }
}

/// Candidate rule being edited before submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDraft {
    pub source_ip: String,
    pub destination_ip: String,
    pub source_port: String,
    pub destination_port: String,
    pub protocol: String,
    pub state: String,
    pub action: String,
    pub rate_limit: String,
    pub limit_window: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_action: Option<bool>,
}

impl RuleDraft {
    pub fn get(&self, field: RuleField) -> String {
        match field {
            RuleField::SourceIp => self.source_ip.clone(),
            RuleField::DestinationIp => self.destination_ip.clone(),
            RuleField::SourcePort => self.source_port.clone(),
            RuleField::DestinationPort => self.destination_port.clone(),
            RuleField::RateLimit => self.rate_limit.clone(),
            RuleField::LimitWindow => self.limit_window.clone(),
            RuleField::Protocol => self.protocol.clone(),
            RuleField::State => self.state.clone(),
            RuleField::Action => self.action.clone(),
            RuleField::LogAction => match self.log_action {
                Some(true) => "true".to_string(),
                Some(false) => "false".to_string(),
                None => String::new(),
            },
        }
    }

    /// Apply an edit. `log_action` is coerced to a boolean here, not at validation.
    pub fn set_field(&mut self, field: RuleField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RuleField::SourceIp => self.source_ip = value,
            RuleField::DestinationIp => self.destination_ip = value,
            RuleField::SourcePort => self.source_port = value,
            RuleField::DestinationPort => self.destination_port = value,
            RuleField::RateLimit => self.rate_limit = value,
            RuleField::LimitWindow => self.limit_window = value,
            RuleField::Protocol => self.protocol = value,
            RuleField::State => self.state = value,
            RuleField::Action => self.action = value,
            RuleField::LogAction => self.log_action = Some(value == "true"),
        }
    }

    /// First-fail check of the required fields in `RuleField::REQUIRED` order.
    pub fn validate(&self) -> Result<()> {
        match RuleField::REQUIRED
            .iter()
            .find(|field| self.get(**field).is_empty())
        {
            Some(field) => Err(ConsoleError::Validation(*field)),
            None => Ok(()),
        }
    }
}

fn flexible_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s == "true",
        serde_json::Value::Number(n) => n.as_i64().map_or(false, |n| n != 0),
        _ => false,
    })
}

/// Draft with every required field filled, for tests across the crate.
#[cfg(test)]
pub(crate) fn sample_draft() -> RuleDraft {
    let mut draft = RuleDraft::default();
    for (field, value) in [
        (RuleField::SourceIp, "10.0.0.1"),
        (RuleField::DestinationIp, "10.0.0.2"),
        (RuleField::SourcePort, "1234"),
        (RuleField::DestinationPort, "80"),
        (RuleField::Protocol, "tcp"),
        (RuleField::State, "NEW"),
        (RuleField::Action, "ACCEPT"),
        (RuleField::RateLimit, "100"),
        (RuleField::LimitWindow, "60"),
    ] {
        draft.set_field(field, value);
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_sample_draft() {
        assert!(sample_draft().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_each_missing_field() {
        for field in RuleField::REQUIRED {
            let mut draft = sample_draft();
            draft.set_field(field, "");
            assert_eq!(draft.validate(), Err(ConsoleError::Validation(field)));
        }
    }

    #[test]
    fn test_validate_first_missing_field_wins() {
        let mut draft = sample_draft();
        draft.set_field(RuleField::Action, "");
        draft.set_field(RuleField::RateLimit, "");
        draft.set_field(RuleField::DestinationIp, "");
        assert_eq!(
            draft.validate(),
            Err(ConsoleError::Validation(RuleField::DestinationIp))
        );
    }

    #[test]
    fn test_log_action_is_optional_and_coerced_on_edit() {
        let mut draft = sample_draft();
        assert_eq!(draft.log_action, None);
        assert!(draft.validate().is_ok());

        draft.set_field(RuleField::LogAction, "true");
        assert_eq!(draft.log_action, Some(true));
        draft.set_field(RuleField::LogAction, "yes");
        assert_eq!(draft.log_action, Some(false));
    }

    #[test]
    fn test_unset_log_action_is_omitted_from_body() {
        let body = serde_json::to_value(sample_draft()).unwrap();
        assert!(body.get("log_action").is_none());
        assert_eq!(body["rate_limit"], json!("100"));
    }

    #[test]
    fn test_rule_decodes_numeric_fields() {
        let rule: Rule = serde_json::from_value(json!({
            "id": 7,
            "source_ip": "10.0.0.1",
            "destination_ip": "10.0.0.2",
            "source_port": 1234,
            "destination_port": "80",
            "protocol": "tcp",
            "state": "NEW",
            "action": "ACCEPT",
            "rate_limit": 100,
            "limit_window": 60,
            "log_action": true
        }))
        .unwrap();

        assert_eq!(rule.id, RuleId::new("7"));
        assert_eq!(rule.source_port, "1234");
        assert_eq!(rule.field_text(RuleField::LogAction), "True");
        assert!(rule.matches_draft(&sample_draft()));
    }
}
