#[cfg(test)]
#[path = "workspace_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Map;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub id_token: String,
}

/// Payload returned once the backend has verified a credential.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerifyResponse {
    pub fn user_id(&self) -> Option<String> {
        match &self.user_id {
            Some(Value::String(id)) if !id.is_empty() => return Some(id.to_string()),
            Some(Value::Number(id)) => return Some(id.to_string()),
            _ => return None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub connected: Value,
}

impl StatusResponse {
    /// Follows JSON truthiness, so `1` or `"yes"` count as connected.
    pub fn is_connected(&self) -> bool {
        match &self.connected {
            Value::Null => return false,
            Value::Bool(connected) => return *connected,
            Value::Number(number) => return number.as_f64().map_or(false, |n| return n != 0.0),
            Value::String(text) => return !text.is_empty(),
            Value::Array(_) | Value::Object(_) => return true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeResponse {
    #[serde(default)]
    pub auth_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondRequest {
    pub message: String,
    pub user_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RespondResponse {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub results: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorResponse {
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            None | Some(Value::Null) => return None,
            Some(Value::String(detail)) if detail.is_empty() => return None,
            Some(Value::String(detail)) => return Some(detail.to_string()),
            Some(detail) => return Some(detail.to_string()),
        }
    }
}

/// The backend's HTTP contract. All paths are relative to the configured
/// backend origin.
#[async_trait]
pub trait WorkspaceBackend {
    /// Origin every request is made against.
    fn url(&self) -> String;

    /// Exchanges an identity credential for a verified session.
    /// `POST /auth/google`
    async fn verify(&self, id_token: &str) -> Result<VerifyResponse>;

    /// Whether the account has granted workspace access.
    /// `GET /auth/google/status`
    async fn connection_status(&self, user_id: &str) -> Result<bool>;

    /// URL of the external consent page, if the backend provides one.
    /// `GET /auth/google/authorize`
    async fn authorize_url(&self, user_id: &str) -> Result<Option<String>>;

    /// Sends a chat message on behalf of the account.
    /// `POST /api/respond`
    async fn respond(&self, message: &str, user_id: &str) -> Result<RespondResponse>;
}

pub type WorkspaceBackendArc = Arc<dyn WorkspaceBackend + Send + Sync>;
