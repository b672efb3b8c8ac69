// Integration tests for the API client wrapper against a mock server

use crate::common::{store_with_credential, test_session_store};
use crate::{client_for, unreachable_client};
use mockito::Matcher;
use serde_json::json;
use unisphere_client::api::{ApiClient, Method, MultipartField, RequestOptions};
use unisphere_client::core::errors::ClientError;
use unisphere_client::core::models::Role;

#[tokio::test]
async fn test_json_body_carries_json_content_type() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let client = client_for(&server, test_session_store());
    client
        .request(
            Method::POST,
            "/auth/login",
            RequestOptions::new().json(json!({"email": "a@b.edu"})),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_multipart_body_lets_transport_set_content_type() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/universities")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let client = client_for(&server, test_session_store());
    client
        .request(
            Method::POST,
            "/universities",
            RequestOptions::new().multipart(vec![
                MultipartField::text("name", "Tech University"),
                MultipartField::file("logo", "logo.png", "image/png", vec![0x89, 0x50]),
            ]),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_bearer_attached_when_credential_present() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/universities/pending")
        .match_header("authorization", "Bearer admin-tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": []}"#)
        .create_async()
        .await;

    let sessions = store_with_credential(Role::Admin, "admin-tok");
    let client = client_for(&server, sessions);
    client
        .get("/universities/pending", Some(Role::Admin))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_bearer_omitted_without_credential() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/universities")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": []}"#)
        .create_async()
        .await;

    let client = client_for(&server, test_session_store());
    client.get("/universities", Some(Role::Admin)).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_leading_separator_inserted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/events")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let client = client_for(&server, test_session_store());
    client.get("events", None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_json_response_wrapped_in_message_shape() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("all good")
        .create_async()
        .await;

    let client = client_for(&server, test_session_store());
    let body = client.get("/status", None).await.unwrap();
    assert_eq!(body, json!({"message": "all good"}));
}

#[tokio::test]
async fn test_unparsable_json_response_treated_as_empty_object() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{truncated")
        .create_async()
        .await;

    let client = client_for(&server, test_session_store());
    let body = client.get("/status", None).await.unwrap();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_error_status_uses_body_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "message": "Invalid credentials"}"#)
        .create_async()
        .await;

    let client = client_for(&server, test_session_store());
    let err = client
        .post_json("/auth/login", None, json!({"email": "a@b.edu"}))
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert!(ClientError::Api {
        status: 401,
        message: String::new()
    }
    .is_auth_error());
}

#[tokio::test]
async fn test_error_status_without_message_gets_generic_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/universities")
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server, test_session_store());
    let err = client.get("/universities", None).await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Server error (503)");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let client = unreachable_client(test_session_store());
    let err = client.get("/universities", None).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
