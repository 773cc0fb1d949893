use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use serde_json::json;
use tokio::sync::mpsc;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::BackendStatus;
use crate::domain::models::Event;
use crate::domain::models::Location;
use crate::domain::models::LocationArc;
use crate::domain::models::Message;
use crate::domain::models::WorkspaceBackendArc;
use crate::infrastructure::api::WorkspaceApi;
use crate::infrastructure::location::LaunchLocation;

struct Running {
    actions: mpsc::UnboundedSender<Action>,
    events: mpsc::UnboundedReceiver<Event>,
    location: LocationArc,
}

fn start(url: &str) -> Result<Running> {
    let backend: WorkspaceBackendArc = Arc::new(WorkspaceApi::new(url));
    let location: LocationArc = Arc::new(LaunchLocation::new("")?);
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let service_location = location.clone();
    tokio::spawn(async move {
        return ActionsService::start(backend, service_location, event_tx, &mut action_rx).await;
    });

    return Ok(Running {
        actions: action_tx,
        events: event_rx,
        location,
    });
}

#[tokio::test]
async fn it_verifies_then_checks_connection() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let verify_mock = server
        .mock("POST", "/auth/google")
        .with_status(200)
        .with_body(json!({ "user_id": "u-1", "email": "dana@example.com" }).to_string())
        .create_async()
        .await;
    let status_mock = server
        .mock("GET", "/auth/google/status")
        .match_query(mockito::Matcher::UrlEncoded("user_id".into(), "u-1".into()))
        .with_status(200)
        .with_body(json!({ "connected": true }).to_string())
        .create_async()
        .await;

    let mut running = start(&server.url())?;
    running
        .actions
        .send(Action::VerifySession("token-abc".to_string()))?;

    match running.events.recv().await {
        Some(Event::VerificationSettled(BackendStatus::Ok(payload))) => {
            assert_eq!(payload.user_id(), Some("u-1".to_string()));
        }
        _ => bail!("Wrong type from recv"),
    }
    match running.events.recv().await {
        Some(Event::ConnectionStatus(connected)) => assert!(connected),
        _ => bail!("Wrong type from recv"),
    }

    verify_mock.assert_async().await;
    status_mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_skips_connection_check_on_failed_verification() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let verify_mock = server
        .mock("POST", "/auth/google")
        .with_status(400)
        .with_body(json!({ "detail": "bad token" }).to_string())
        .create_async()
        .await;
    let status_mock = server
        .mock("GET", "/auth/google/status")
        .match_query(mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut running = start(&server.url())?;
    running
        .actions
        .send(Action::VerifySession("token-abc".to_string()))?;

    match running.events.recv().await {
        Some(Event::VerificationSettled(status)) => {
            assert_eq!(status, BackendStatus::Error("bad token".to_string()));
        }
        _ => bail!("Wrong type from recv"),
    }

    drop(running.actions);
    assert!(running.events.recv().await.is_none());

    verify_mock.assert_async().await;
    status_mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_replies_to_chat_requests() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/respond")
        .with_status(200)
        .with_body(json!({ "summary": "Done" }).to_string())
        .create_async()
        .await;

    let mut running = start(&server.url())?;
    let message = Message::user("hello");
    running
        .actions
        .send(Action::ChatRequest(message.clone(), "u-1".to_string()))?;

    match running.events.recv().await {
        Some(Event::ChatReply(reply)) => {
            assert_eq!(reply.text, "Done");
            assert_eq!(reply.id, format!("{}-reply", message.id));
        }
        _ => bail!("Wrong type from recv"),
    }

    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_redirects_to_the_consent_page() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/auth/google/authorize")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(json!({ "auth_url": "https://accounts.example.com/consent" }).to_string())
        .create_async()
        .await;

    let mut running = start(&server.url())?;
    running
        .actions
        .send(Action::AuthorizeWorkspace("u-1".to_string()))?;

    match running.events.recv().await {
        Some(Event::AuthorizationRedirected(url)) => {
            assert_eq!(url, "https://accounts.example.com/consent");
        }
        _ => bail!("Wrong type from recv"),
    }
    assert_eq!(
        running.location.assigned(),
        Some("https://accounts.example.com/consent".to_string())
    );

    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_reports_authorization_failures() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/auth/google/authorize")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .with_body("nope")
        .create_async()
        .await;

    let mut running = start(&server.url())?;
    running
        .actions
        .send(Action::AuthorizeWorkspace("u-1".to_string()))?;

    match running.events.recv().await {
        Some(Event::AuthorizationFailed()) => {}
        _ => bail!("Wrong type from recv"),
    }

    mock.assert_async().await;
    return Ok(());
}
