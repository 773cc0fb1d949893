#[cfg(test)]
#[path = "session_verifier_test.rs"]
mod tests;

use crate::domain::models::BackendStatus;
use crate::domain::models::WorkspaceBackendArc;

pub struct SessionVerifier {}

impl SessionVerifier {
    /// Exchanges a credential with the backend. Never retries, the caller
    /// starts a new verification for every new credential.
    pub async fn verify(backend: &WorkspaceBackendArc, credential: &str) -> BackendStatus {
        match backend.verify(credential).await {
            Ok(payload) => {
                tracing::debug!(user_id = payload.user_id(), "Backend verified credential");
                return BackendStatus::Ok(payload);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Backend verification failed");
                return BackendStatus::Error(err.to_string());
            }
        }
    }

    /// Whether workspace access is granted. Any failure reads as not connected.
    pub async fn check_connection(backend: &WorkspaceBackendArc, user_id: &str) -> bool {
        match backend.connection_status(user_id).await {
            Ok(connected) => return connected,
            Err(err) => {
                tracing::warn!(error = ?err, user_id, "Connection status check failed");
                return false;
            }
        }
    }
}
