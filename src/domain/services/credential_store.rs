#[cfg(test)]
#[path = "credential_store_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::IdentityWidgetArc;
use crate::domain::models::KeyValueStoreBox;
use crate::domain::models::Profile;
use crate::domain::models::Session;

pub const SESSION_STORAGE_KEY: &str = "workspaceai.session";

/// Owns the signed-in session and keeps its persisted copy in sync.
pub struct CredentialStore {
    session: Session,
    storage: KeyValueStoreBox,
}

impl CredentialStore {
    pub fn new(storage: KeyValueStoreBox) -> CredentialStore {
        return CredentialStore {
            session: Session::default(),
            storage,
        };
    }

    pub fn session(&self) -> &Session {
        return &self.session;
    }

    /// Loads the persisted session. A corrupt entry is removed and the session
    /// stays empty, nothing is reported to the caller.
    pub async fn restore(&mut self) {
        let stored = match self.storage.get(SESSION_STORAGE_KEY).await {
            Ok(Some(stored)) => stored,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to read stored session");
                return;
            }
        };

        match serde_json::from_str::<Session>(&stored) {
            Ok(session) => {
                self.session = session.normalized();
                tracing::debug!(
                    has_credential = self.session.credential.is_some(),
                    has_profile = self.session.profile.is_some(),
                    user_id = self.session.user_id,
                    "Restored session"
                );
            }
            Err(err) => {
                tracing::warn!(error = ?err, "Stored session is corrupt, clearing it");
                if let Err(err) = self.storage.remove(SESSION_STORAGE_KEY).await {
                    tracing::error!(error = ?err, "Failed to clear corrupt session");
                }
            }
        }
    }

    pub async fn persist(&self) -> Result<()> {
        if self.session.is_empty() {
            return self.storage.remove(SESSION_STORAGE_KEY).await;
        }

        let payload = serde_json::to_string(&self.session)?;
        return self.storage.set(SESSION_STORAGE_KEY, &payload).await;
    }

    /// Stores a freshly issued credential along with its decoded claims.
    pub async fn receive_credential(&mut self, token: &str) -> Result<()> {
        self.session.credential = Some(token.to_string()).filter(|token| return !token.is_empty());
        self.session.profile = Profile::from_jwt(token);
        if self.session.profile.is_none() {
            tracing::warn!("Credential payload could not be decoded");
        }

        return self.persist().await;
    }

    pub async fn set_user_id(&mut self, user_id: Option<String>) -> Result<()> {
        self.session.user_id = user_id.filter(|user_id| return !user_id.is_empty());
        return self.persist().await;
    }

    /// Forgets the session everywhere, including the widget's one-tap memory.
    pub async fn clear(&mut self, widget: &IdentityWidgetArc) -> Result<()> {
        self.session = Session::default();
        widget.disable_auto_select();
        return self.storage.remove(SESSION_STORAGE_KEY).await;
    }
}
