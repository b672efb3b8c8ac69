// Unit tests for auth flows against the mock API client

use crate::common::{
    login_response, store_with_credential, test_session_store, MockApiClient, MockFailure,
};
use serde_json::json;
use std::sync::Arc;
use unisphere_client::auth::audit::AuditLogger;
use unisphere_client::auth::flows::AuthFlows;
use unisphere_client::api::RequestBody;
use unisphere_client::core::errors::ClientError;
use unisphere_client::core::models::{FormOutcome, Role};

fn flows_with(api: Arc<MockApiClient>, sessions: unisphere_client::session::store::SessionStore) -> AuthFlows {
    AuthFlows::new(api, sessions, Arc::new(AuditLogger::new()))
}

#[tokio::test]
async fn test_login_stores_credential_and_profile() {
    let api = Arc::new(MockApiClient::with_response(login_response(
        "issued-token",
        "Ada",
        "ada@uni.edu",
    )));
    let sessions = test_session_store();
    let flows = flows_with(api.clone(), sessions.clone());

    let outcome = flows
        .login(Role::Student, &json!({"email": "ada@uni.edu", "password": "pw"}))
        .await
        .unwrap();

    let FormOutcome::Submitted(profile) = outcome else {
        panic!("expected submission");
    };
    assert_eq!(profile.name.as_deref(), Some("Ada"));

    let credential = sessions.credential(Role::Student).unwrap().unwrap();
    assert_eq!(credential.token.expose(), "issued-token");
    assert_eq!(credential.profile.email.as_deref(), Some("ada@uni.edu"));

    // The login request itself goes out unauthenticated
    let calls = api.recorded();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/auth/login");
    assert!(calls[0].options.bearer.is_none());
    assert!(calls[0].options.acting_role.is_none());
}

#[tokio::test]
async fn test_login_validation_failure_makes_no_request() {
    let api = Arc::new(MockApiClient::default());
    let flows = flows_with(api.clone(), test_session_store());

    let outcome = flows
        .login(Role::Student, &json!({"email": "not-an-email", "password": ""}))
        .await
        .unwrap();

    assert!(outcome.is_invalid());
    assert!(api.recorded().is_empty());
}

#[tokio::test]
async fn test_login_rejection_leaves_store_untouched() {
    let api = Arc::new(MockApiClient::failing(MockFailure::Api {
        status: 401,
        message: "Invalid credentials".to_string(),
    }));
    let sessions = test_session_store();
    let flows = flows_with(api, sessions.clone());

    let result = flows
        .login(Role::Student, &json!({"email": "ada@uni.edu", "password": "wrong-pw"}))
        .await;

    assert!(matches!(result, Err(ClientError::Api { status: 401, .. })));
    assert!(sessions.credential(Role::Student).unwrap().is_none());
}

#[tokio::test]
async fn test_login_response_without_token_is_state_error() {
    let api = Arc::new(MockApiClient::with_response(
        json!({"success": true, "data": {"user": {"name": "Ada"}}}),
    ));
    let flows = flows_with(api, test_session_store());

    let result = flows
        .login(Role::Student, &json!({"email": "ada@uni.edu", "password": "pw"}))
        .await;
    assert!(matches!(result, Err(ClientError::State(_))));
}

#[tokio::test]
async fn test_logout_clears_state_and_routes_by_role() {
    let api = Arc::new(MockApiClient::default());
    let sessions = store_with_credential(Role::Admin, "admin-token");
    let flows = flows_with(api.clone(), sessions.clone());

    let outcome = flows.logout(Role::Admin).await.unwrap();
    assert_eq!(outcome.redirect_to, "/admin/login");
    assert!(sessions.credential(Role::Admin).unwrap().is_none());

    // The invalidation request carried the pre-clear token
    outcome.invalidation.unwrap().await.unwrap();
    let calls = api.recorded();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/superadmin/logout");
    let token = calls[0].options.bearer.as_ref().unwrap();
    assert_eq!(token.expose(), "admin-token");
}

#[tokio::test]
async fn test_logout_clears_state_when_invalidation_fails() {
    let api = Arc::new(MockApiClient::failing(MockFailure::Transport(
        "Connection failed".to_string(),
    )));
    let sessions = store_with_credential(Role::Student, "student-token");
    let flows = flows_with(api, sessions.clone());

    let outcome = flows.logout(Role::Student).await.unwrap();
    assert_eq!(outcome.redirect_to, "/");
    assert!(sessions.credential(Role::Student).unwrap().is_none());

    // The detached task must swallow the failure, not propagate it
    outcome.invalidation.unwrap().await.unwrap();
}

#[tokio::test]
async fn test_logout_without_credential_skips_invalidation() {
    let api = Arc::new(MockApiClient::default());
    let flows = flows_with(api.clone(), test_session_store());

    let outcome = flows.logout(Role::University).await.unwrap();
    assert_eq!(outcome.redirect_to, "/");
    assert!(outcome.invalidation.is_none());
    assert!(api.recorded().is_empty());
}

#[tokio::test]
async fn test_register_admin_is_rejected() {
    let api = Arc::new(MockApiClient::default());
    let flows = flows_with(api, test_session_store());

    let result = flows.register(Role::Admin, &json!({})).await;
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_reset_password_strips_confirmation_field() {
    let api = Arc::new(MockApiClient::with_response(
        json!({"success": true, "message": "Password updated"}),
    ));
    let flows = flows_with(api.clone(), test_session_store());

    let outcome = flows
        .reset_password(&json!({
            "email": "ada@uni.edu",
            "otp": "123456",
            "password": "mathematical",
            "confirmPassword": "mathematical"
        }))
        .await
        .unwrap();

    assert_eq!(outcome, FormOutcome::Submitted("Password updated".to_string()));

    let calls = api.recorded();
    let RequestBody::Json(ref payload) = calls[0].options.body else {
        panic!("expected json body");
    };
    assert!(payload.get("confirmPassword").is_none());
    assert_eq!(payload["otp"], "123456");
}

#[tokio::test]
async fn test_request_password_otp_validates_email() {
    let api = Arc::new(MockApiClient::default());
    let flows = flows_with(api.clone(), test_session_store());

    let outcome = flows
        .request_password_otp(&json!({"email": "nope"}))
        .await
        .unwrap();
    assert!(outcome.is_invalid());
    assert!(api.recorded().is_empty());
}
