#[cfg(test)]
#[path = "workspace_auth_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::LocationArc;
use crate::domain::models::WorkspaceBackendArc;

/// Query flag the consent flow appends when sending the user back.
pub const RETURN_FLAG: &str = "google_connected";
pub const AUTHORIZATION_ERROR: &str = "Failed to start Google authorization.";

pub struct WorkspaceAuthorization {}

impl WorkspaceAuthorization {
    /// Asks the backend for the consent page and hands the app off to it.
    /// Returns the page handed off to, if any.
    pub async fn connect(
        backend: &WorkspaceBackendArc,
        location: &LocationArc,
        user_id: Option<&str>,
    ) -> Result<Option<String>> {
        let user_id = match user_id.filter(|user_id| return !user_id.is_empty()) {
            Some(user_id) => user_id,
            None => return Ok(None),
        };

        let auth_url = backend.authorize_url(user_id).await?;
        if let Some(auth_url) = &auth_url {
            location.assign(auth_url);
        } else {
            tracing::warn!(user_id, "Backend returned no authorization URL");
        }

        return Ok(auth_url);
    }

    /// Detects a return from the consent page and strips the flag so it is
    /// only seen once.
    pub fn observe_return(location: &LocationArc) -> bool {
        if location.query_param(RETURN_FLAG).as_deref() != Some("1") {
            return false;
        }

        location.replace("/");
        tracing::debug!("Returned from workspace authorization");
        return true;
    }
}
