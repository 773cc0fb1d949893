use anyhow::Result;
use mockito::Matcher;
use serde_json::json;

use super::WorkspaceApi;
use crate::domain::models::WorkspaceBackend;

#[tokio::test]
async fn it_trims_trailing_slash() {
    let api = WorkspaceApi::new("http://localhost:8000/");
    assert_eq!(api.url(), "http://localhost:8000");
}

#[tokio::test]
async fn it_verifies_credentials() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/google")
        .match_body(Matcher::Json(json!({ "id_token": "token-abc" })))
        .with_status(200)
        .with_body(json!({ "user_id": "u-1", "email": "dana@example.com" }).to_string())
        .create_async()
        .await;

    let api = WorkspaceApi::new(&server.url());
    let res = api.verify("token-abc").await?;

    assert_eq!(res.user_id(), Some("u-1".to_string()));
    assert_eq!(res.email, Some("dana@example.com".to_string()));
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_fails_verification_with_detail() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/google")
        .with_status(400)
        .with_body(json!({ "detail": "bad token" }).to_string())
        .create_async()
        .await;

    let api = WorkspaceApi::new(&server.url());
    let err = api.verify("token-abc").await.unwrap_err();

    assert_eq!(err.to_string(), "bad token");
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_verification_without_detail() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/google")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let api = WorkspaceApi::new(&server.url());
    let err = api.verify("token-abc").await.unwrap_err();

    assert_eq!(err.to_string(), "Backend verification failed");
    mock.assert_async().await;
}

#[tokio::test]
async fn it_checks_connection_status() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/auth/google/status")
        .match_query(Matcher::UrlEncoded("user_id".into(), "u-1".into()))
        .with_status(200)
        .with_body(json!({ "connected": true }).to_string())
        .create_async()
        .await;

    let api = WorkspaceApi::new(&server.url());
    assert!(api.connection_status("u-1").await?);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_fails_connection_status_on_non_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/auth/google/status")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html></html>")
        .create_async()
        .await;

    let api = WorkspaceApi::new(&server.url());
    assert!(api.connection_status("u-1").await.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_gets_authorize_url() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/auth/google/authorize")
        .match_query(Matcher::UrlEncoded("user_id".into(), "u-1".into()))
        .with_status(200)
        .with_body(json!({ "auth_url": "https://accounts.example.com/consent" }).to_string())
        .create_async()
        .await;

    let api = WorkspaceApi::new(&server.url());
    assert_eq!(
        api.authorize_url("u-1").await?,
        Some("https://accounts.example.com/consent".to_string())
    );
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_returns_none_without_authorize_url() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/auth/google/authorize")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let api = WorkspaceApi::new(&server.url());
    assert_eq!(api.authorize_url("u-1").await?, None);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_sends_chat_requests() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/respond")
        .match_body(Matcher::Json(
            json!({ "message": "hello", "user_id": "u-1" }),
        ))
        .with_status(200)
        .with_body(json!({ "summary": "Done" }).to_string())
        .create_async()
        .await;

    let api = WorkspaceApi::new(&server.url());
    let res = api.respond("hello", "u-1").await?;

    assert_eq!(res.summary, Some("Done".to_string()));
    assert_eq!(res.results, None);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_fails_chat_requests_with_fallback() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/respond")
        .with_status(502)
        .create_async()
        .await;

    let api = WorkspaceApi::new(&server.url());
    let err = api.respond("hello", "u-1").await.unwrap_err();

    assert_eq!(err.to_string(), "Chat request failed");
    mock.assert_async().await;
}
