#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::ChatController;
use super::SessionVerifier;
use super::WorkspaceAuthorization;
use crate::domain::models::Action;
use crate::domain::models::BackendStatus;
use crate::domain::models::Event;
use crate::domain::models::LocationArc;
use crate::domain::models::Message;
use crate::domain::models::WorkspaceBackendArc;

async fn verify_session(
    backend: WorkspaceBackendArc,
    credential: String,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let status = SessionVerifier::verify(&backend, &credential).await;
    let mut user_id = None;
    if let BackendStatus::Ok(payload) = &status {
        user_id = payload.user_id();
    }

    tx.send(Event::VerificationSettled(status))?;

    if let Some(user_id) = user_id {
        let connected = SessionVerifier::check_connection(&backend, &user_id).await;
        tx.send(Event::ConnectionStatus(connected))?;
    }

    return Ok(());
}

async fn chat_request(
    backend: WorkspaceBackendArc,
    message: Message,
    user_id: String,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let reply = ChatController::request_reply(&backend, &message, &user_id).await;
    tx.send(Event::ChatReply(reply))?;

    return Ok(());
}

async fn authorize_workspace(
    backend: WorkspaceBackendArc,
    location: LocationArc,
    user_id: String,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match WorkspaceAuthorization::connect(&backend, &location, Some(&user_id)).await {
        Ok(Some(url)) => tx.send(Event::AuthorizationRedirected(url))?,
        Ok(None) => {}
        Err(err) => {
            tracing::error!(error = ?err, "Failed to start workspace authorization");
            tx.send(Event::AuthorizationFailed())?;
        }
    }

    return Ok(());
}

/// Runs backend calls off the UI loop. Each action gets its own task and its
/// outcome comes back as an event. Tasks are never cancelled, late results
/// are applied as they arrive.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: WorkspaceBackendArc,
        location: LocationArc,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            let worker_backend = backend.clone();

            match action {
                Action::VerifySession(credential) => {
                    tokio::spawn(async move {
                        if let Err(err) = verify_session(worker_backend, credential, worker_tx).await {
                            tracing::error!(error = ?err, "Verification result dropped");
                        }
                    });
                }
                Action::ChatRequest(message, user_id) => {
                    tokio::spawn(async move {
                        if let Err(err) =
                            chat_request(worker_backend, message, user_id, worker_tx).await
                        {
                            tracing::error!(error = ?err, "Chat reply dropped");
                        }
                    });
                }
                Action::AuthorizeWorkspace(user_id) => {
                    let worker_location = location.clone();
                    tokio::spawn(async move {
                        if let Err(err) =
                            authorize_workspace(worker_backend, worker_location, user_id, worker_tx)
                                .await
                        {
                            tracing::error!(error = ?err, "Authorization result dropped");
                        }
                    });
                }
            }
        }

        tracing::debug!("Action channel closed");
        return Ok(());
    }
}
