// Integration tests for the typed resource calls

use crate::client_for;
use crate::common::{store_with_credential, test_session_store};
use mockito::Matcher;
use std::sync::Arc;
use unisphere_client::api::resources::{LogoUpload, ScholarshipApi, UniversityApi, UniversityDraft};
use unisphere_client::core::models::Role;

#[tokio::test]
async fn test_list_universities_decodes_envelope() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/universities")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "success": true,
                "data": [
                    {"id": "u1", "name": "Tech University", "email": "a@tech.edu", "location": "Lagos", "approved": true},
                    {"id": "u2", "name": "Arts College", "email": "b@arts.edu", "location": "Abuja"}
                ]
            }"#,
        )
        .create_async()
        .await;

    let sessions = test_session_store();
    let api = Arc::new(client_for(&server, sessions.clone()));
    let universities = UniversityApi::new(api, sessions);

    let list = universities.list().await.unwrap();
    assert_eq!(list.len(), 2);
    assert!(list[0].approved);
    assert!(!list[1].approved);
}

#[tokio::test]
async fn test_create_university_with_logo_is_multipart() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/universities")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_header("authorization", "Bearer admin-tok")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success": true, "data": {"id": "u3", "name": "Tech University", "email": "a@tech.edu", "location": "Lagos"}}"#,
        )
        .create_async()
        .await;

    let sessions = store_with_credential(Role::Admin, "admin-tok");
    let api = Arc::new(client_for(&server, sessions.clone()));
    let universities = UniversityApi::new(api, sessions);

    let draft = UniversityDraft {
        name: "Tech University".to_string(),
        email: "a@tech.edu".to_string(),
        location: "Lagos".to_string(),
        website: Some("https://tech.edu".to_string()),
        description: None,
        logo: Some(LogoUpload {
            filename: "logo.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }),
    };

    let outcome = universities.create(draft).await.unwrap();
    assert!(!outcome.is_invalid());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_scholarship_create_normalizes_before_send() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/scholarships")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "title": "Merit Award",
            "amount": 5000.0
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": {"title": "Merit Award", "amount": 5000.0}}"#)
        .create_async()
        .await;

    let sessions = store_with_credential(Role::University, "u-tok");
    let api = Arc::new(client_for(&server, sessions.clone()));
    let scholarships = ScholarshipApi::new(api, sessions);

    // Title arrives padded and the amount as a string; both normalize
    let outcome = scholarships
        .create(&serde_json::json!({
            "title": "  Merit Award  ",
            "amount": "5000",
            "deadline": "2026-01-31"
        }))
        .await
        .unwrap();
    assert!(!outcome.is_invalid());
    mock.assert_async().await;
}
