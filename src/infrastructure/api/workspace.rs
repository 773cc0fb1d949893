#[cfg(test)]
#[path = "workspace_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthorizeResponse;
use crate::domain::models::ErrorResponse;
use crate::domain::models::RespondRequest;
use crate::domain::models::RespondResponse;
use crate::domain::models::StatusResponse;
use crate::domain::models::VerifyRequest;
use crate::domain::models::VerifyResponse;
use crate::domain::models::WorkspaceBackend;

pub const VERIFY_FAILED: &str = "Backend verification failed";
pub const CHAT_FAILED: &str = "Chat request failed";

/// Reads the `detail` of an error body, falling back when the body is missing
/// or not JSON.
async fn error_message(res: reqwest::Response, fallback: &str) -> String {
    let status = res.status().as_u16();
    let detail = res
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| return body.message());

    tracing::error!(status, detail, "Backend request failed");
    return detail.unwrap_or_else(|| return fallback.to_string());
}

pub struct WorkspaceApi {
    url: String,
}

impl Default for WorkspaceApi {
    fn default() -> WorkspaceApi {
        return WorkspaceApi::new(&Config::get(ConfigKey::BackendURL));
    }
}

impl WorkspaceApi {
    pub fn new(url: &str) -> WorkspaceApi {
        return WorkspaceApi {
            url: url.trim_end_matches('/').to_string(),
        };
    }
}

#[async_trait]
impl WorkspaceBackend for WorkspaceApi {
    fn url(&self) -> String {
        return self.url.to_string();
    }

    #[allow(clippy::implicit_return)]
    async fn verify(&self, id_token: &str) -> Result<VerifyResponse> {
        tracing::debug!(url = self.url, "Verifying credential");
        let req = VerifyRequest {
            id_token: id_token.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/auth/google", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(error_message(res, VERIFY_FAILED).await);
        }

        return Ok(res.json::<VerifyResponse>().await?);
    }

    #[allow(clippy::implicit_return)]
    async fn connection_status(&self, user_id: &str) -> Result<bool> {
        let res = reqwest::Client::new()
            .get(format!("{url}/auth/google/status", url = self.url))
            .query(&[("user_id", user_id)])
            .send()
            .await?
            .json::<StatusResponse>()
            .await?;

        return Ok(res.is_connected());
    }

    #[allow(clippy::implicit_return)]
    async fn authorize_url(&self, user_id: &str) -> Result<Option<String>> {
        let res = reqwest::Client::new()
            .get(format!("{url}/auth/google/authorize", url = self.url))
            .query(&[("user_id", user_id)])
            .send()
            .await?
            .json::<AuthorizeResponse>()
            .await?;

        return Ok(res.auth_url.filter(|auth_url| return !auth_url.is_empty()));
    }

    #[allow(clippy::implicit_return)]
    async fn respond(&self, message: &str, user_id: &str) -> Result<RespondResponse> {
        tracing::debug!(url = self.url, "Sending chat request");
        let req = RespondRequest {
            message: message.to_string(),
            user_id: user_id.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/respond", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(error_message(res, CHAT_FAILED).await);
        }

        return Ok(res.json::<RespondResponse>().await?);
    }
}
