pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

use crate::config::BackendConfig;
use crate::error::{ConsoleError, Result};
use crate::model::{LogEntry, Rule, RuleDraft, RuleId};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Status the log backend uses for "nothing new since the last poll".
pub const NO_CONTENT: u16 = 204;

/// Backend operations the console knows how to issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    ListRules,
    CreateRule(RuleDraft),
    DeleteRule(RuleId),
    InitialLogs,
    UpdatedLogs,
}

/// Resource paths relative to the backend base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiPaths {
    pub rules: String,
    pub initial_logs: String,
    pub updated_logs: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            rules: "/api-rule/rule".to_string(),
            initial_logs: "/api-logs/initial-logs".to_string(),
            updated_logs: "/api-logs/updated-logs".to_string(),
        }
    }
}

impl From<&BackendConfig> for ApiPaths {
    fn from(config: &BackendConfig) -> Self {
        Self {
            rules: config.rules_path.clone(),
            initial_logs: config.initial_logs_path.clone(),
            updated_logs: config.updated_logs_path.clone(),
        }
    }
}

/// Typed client for the rule and log collections
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    paths: ApiPaths,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, paths: ApiPaths) -> Self {
        Self { transport, paths }
    }

    /// Build a client for a live backend from configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.base_url, config.request_timeout())?;
        Ok(Self::new(Arc::new(transport), ApiPaths::from(config)))
    }

    fn request_for(&self, endpoint: Endpoint) -> Result<ApiRequest> {
        Ok(match endpoint {
            Endpoint::ListRules => ApiRequest::get(&self.paths.rules),
            Endpoint::CreateRule(draft) => {
                let body = serde_json::to_value(draft)
                    .map_err(|e| ConsoleError::Decode(e.to_string()))?;
                ApiRequest::post(&self.paths.rules, body)
            }
            Endpoint::DeleteRule(id) => {
                ApiRequest::delete(format!("{}/{}", self.paths.rules.trim_end_matches('/'), id))
            }
            Endpoint::InitialLogs => ApiRequest::get(&self.paths.initial_logs),
            Endpoint::UpdatedLogs => ApiRequest::get(&self.paths.updated_logs),
        })
    }

    async fn call(&self, endpoint: Endpoint) -> Result<ApiResponse> {
        let request = self.request_for(endpoint)?;
        self.transport.send(request).await
    }

    /// Fetch the whole rule collection
    pub async fn list_rules(&self) -> Result<Vec<Rule>> {
        let response = self.call(Endpoint::ListRules).await?;
        decode(expect_success(response)?)
    }

    /// Submit a new rule. The backend assigns the identifier.
    pub async fn create_rule(&self, draft: &RuleDraft) -> Result<()> {
        let response = self.call(Endpoint::CreateRule(draft.clone())).await?;
        expect_success(response)?;
        Ok(())
    }

    pub async fn delete_rule(&self, id: &RuleId) -> Result<()> {
        let response = self.call(Endpoint::DeleteRule(id.clone())).await?;
        expect_success(response)?;
        Ok(())
    }

    /// Full log snapshot taken at startup
    pub async fn initial_logs(&self) -> Result<Vec<LogEntry>> {
        let response = self.call(Endpoint::InitialLogs).await?;
        decode(expect_success(response)?)
    }

    /// Current log snapshot, `None` when the backend reports nothing new.
    pub async fn updated_logs(&self) -> Result<Option<Vec<LogEntry>>> {
        let response = self.call(Endpoint::UpdatedLogs).await?;
        if response.status == NO_CONTENT {
            return Ok(None);
        }

        match expect_success(response)? {
            None | Some(Value::Null) => Ok(None),
            body => decode(body).map(Some),
        }
    }
}

/// Turn a non-2xx response into a `ServerError`, keeping the backend's `error` detail.
fn expect_success(response: ApiResponse) -> Result<Option<Value>> {
    if response.is_success() {
        return Ok(response.body);
    }

    let detail = response
        .body
        .as_ref()
        .and_then(|body| body.get("error"))
        .map(|err| match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });

    Err(ConsoleError::Server {
        status: response.status,
        detail,
    })
}

fn decode<T: DeserializeOwned>(body: Option<Value>) -> Result<T> {
    let body = body.ok_or_else(|| ConsoleError::Decode("empty response body".to_string()))?;
    serde_json::from_value(body).map_err(|e| ConsoleError::Decode(e.to_string()))
}
