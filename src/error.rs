//! Error types for console operations

use crate::model::RuleField;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Fallback detail when a failed response carries no `error` field.
pub const GENERIC_SERVER_ERROR: &str = "Network response was not ok";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsoleError {
    /// No response was received (connect failure, timeout, broken body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("{}", .detail.as_deref().unwrap_or(GENERIC_SERVER_ERROR))]
    Server { status: u16, detail: Option<String> },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Client-side required-field check failed before any request was sent.
    #[error("Field {0} is required")]
    Validation(RuleField),

    #[error("Failed to add new rule: {}", .0.detail())]
    Create(Box<ConsoleError>),

    /// At least one delete in a batch failed; carries the first failure.
    #[error("Failed to delete rule: {}", .0.detail())]
    AggregateDelete(Box<ConsoleError>),
}

impl ConsoleError {
    /// Human-readable detail without the operation prefix.
    pub fn detail(&self) -> String {
        match self {
            ConsoleError::Server { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string()),
            ConsoleError::Create(inner) | ConsoleError::AggregateDelete(inner) => inner.detail(),
            other => other.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ConsoleError::Validation(_))
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        ConsoleError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_detail_and_fallback() {
        let err = ConsoleError::Server {
            status: 500,
            detail: Some("not found".to_string()),
        };
        assert_eq!(err.detail(), "not found");
        assert_eq!(err.to_string(), "not found");

        let bare = ConsoleError::Server { status: 502, detail: None };
        assert_eq!(bare.to_string(), GENERIC_SERVER_ERROR);
    }

    #[test]
    fn test_wrapped_errors_expose_inner_detail() {
        let inner = ConsoleError::Server {
            status: 500,
            detail: Some("not found".to_string()),
        };
        let err = ConsoleError::AggregateDelete(Box::new(inner));
        assert_eq!(err.detail(), "not found");
        assert_eq!(err.to_string(), "Failed to delete rule: not found");

        let create = ConsoleError::Create(Box::new(ConsoleError::Server {
            status: 400,
            detail: Some("duplicate rule".to_string()),
        }));
        assert_eq!(create.to_string(), "Failed to add new rule: duplicate rule");
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = ConsoleError::Validation(RuleField::RateLimit);
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Field rate_limit is required");
    }
}
