#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::ChatController;
use super::CredentialStore;
use super::Scroll;
use super::WorkspaceAuthorization;
use super::AUTHORIZATION_ERROR;
use crate::domain::models::Action;
use crate::domain::models::AuthMode;
use crate::domain::models::BackendStatus;
use crate::domain::models::IdentityWidgetArc;
use crate::domain::models::KeyValueStoreBox;
use crate::domain::models::LocationArc;
use crate::domain::models::Message;
use crate::domain::models::Profile;
use crate::domain::models::Session;

pub struct AppState {
    pub auth_mode: AuthMode,
    pub backend_status: Option<BackendStatus>,
    pub backend_url: String,
    pub chat: ChatController,
    pub client_id: String,
    pub connected: bool,
    pub error: String,
    pub redirect: Option<String>,
    pub scroll: Scroll,
    pub ticks: usize,
    credentials: CredentialStore,
    location: LocationArc,
    widget: IdentityWidgetArc,
}

impl AppState {
    pub fn new(
        storage: KeyValueStoreBox,
        widget: IdentityWidgetArc,
        location: LocationArc,
        client_id: &str,
        backend_url: &str,
    ) -> AppState {
        return AppState {
            auth_mode: AuthMode::default(),
            backend_status: None,
            backend_url: backend_url.to_string(),
            chat: ChatController::default(),
            client_id: client_id.trim().to_string(),
            connected: false,
            error: "".to_string(),
            redirect: None,
            scroll: Scroll::default(),
            ticks: 0,
            credentials: CredentialStore::new(storage),
            location,
            widget,
        };
    }

    pub fn session(&self) -> &Session {
        return self.credentials.session();
    }

    pub fn profile(&self) -> Option<&Profile> {
        return self.session().profile.as_ref();
    }

    pub fn user_id(&self) -> Option<&str> {
        return self.session().user_id.as_deref();
    }

    pub fn client_missing(&self) -> bool {
        return self.client_id.is_empty();
    }

    /// Restores the persisted session, picks up a return from the consent
    /// page and re-verifies a restored credential.
    pub async fn initialize(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.credentials.restore().await;

        if WorkspaceAuthorization::observe_return(&self.location) {
            self.set_connected(true, "launch-url");
        }

        if let Some(credential) = self.session().credential.clone() {
            self.start_verification(credential, tx)?;
        }

        return Ok(());
    }

    fn start_verification(
        &mut self,
        credential: String,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.backend_status = Some(BackendStatus::Loading);
        tx.send(Action::VerifySession(credential))?;

        return Ok(());
    }

    fn set_connected(&mut self, connected: bool, source: &str) {
        tracing::debug!(connected, source, "Workspace connection changed");
        self.connected = connected;
    }

    pub async fn handle_credential(
        &mut self,
        credential: String,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.error.clear();
        if self.session().credential.as_deref() == Some(credential.as_str()) {
            tracing::debug!("Credential unchanged, skipping verification");
            return Ok(());
        }

        if let Err(err) = self.credentials.receive_credential(&credential).await {
            tracing::error!(error = ?err, "Failed to persist session");
        }

        return self.start_verification(credential, tx);
    }

    pub async fn handle_verification(&mut self, status: BackendStatus) {
        if let BackendStatus::Ok(payload) = &status {
            if let Err(err) = self.credentials.set_user_id(payload.user_id()).await {
                tracing::error!(error = ?err, "Failed to persist session");
            }
        }

        self.backend_status = Some(status);
    }

    pub fn handle_connection_status(&mut self, connected: bool) {
        self.set_connected(connected, "status-check");
    }

    /// Starts workspace authorization. Nothing happens once connected or
    /// before the backend has assigned a user id.
    pub fn connect_workspace(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.connected {
            return Ok(());
        }

        if let Some(user_id) = self.user_id() {
            tx.send(Action::AuthorizeWorkspace(user_id.to_string()))?;
        }

        return Ok(());
    }

    pub fn handle_authorization_failed(&mut self) {
        self.error = AUTHORIZATION_ERROR.to_string();
    }

    pub fn handle_authorization_redirected(&mut self, url: String) {
        self.redirect = Some(url);
    }

    /// Returns whether the draft was consumed.
    pub fn send_message(&mut self, draft: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        let user_id = self.session().user_id.clone();
        let sent = self.chat.send(draft, user_id.as_deref(), tx)?;
        if sent {
            self.scroll.last();
        }

        return Ok(sent);
    }

    pub fn handle_chat_reply(&mut self, reply: Message) {
        self.chat.settle(reply);
        self.scroll.last();
    }

    /// Whether there is anything for sign out to clear.
    pub fn can_sign_out(&self) -> bool {
        return self.profile().is_some() || self.session().credential.is_some();
    }

    pub async fn sign_out(&mut self) {
        if let Err(err) = self.credentials.clear(&self.widget).await {
            tracing::error!(error = ?err, "Failed to clear stored session");
        }

        self.backend_status = None;
        self.connected = false;
        self.error.clear();
        tracing::debug!("Signed out");
    }

    pub fn toggle_auth_mode(&mut self) {
        self.auth_mode = self.auth_mode.toggle();
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }
}
