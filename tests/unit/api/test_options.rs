// Unit tests for request options and the trait convenience methods

use crate::common::MockApiClient;
use serde_json::json;
use std::sync::Arc;
use unisphere_client::api::{ApiClient, Method, MultipartField, RequestBody, RequestOptions};
use unisphere_client::core::models::Role;

#[test]
fn test_options_builder() {
    let options = RequestOptions::new()
        .acting_as(Role::Admin)
        .json(json!({"a": 1}))
        .content_type("application/json; charset=utf-8");

    assert_eq!(options.acting_role, Some(Role::Admin));
    assert!(matches!(options.body, RequestBody::Json(_)));
    assert_eq!(
        options.content_type.as_deref(),
        Some("application/json; charset=utf-8")
    );
}

#[test]
fn test_default_options_are_empty_and_unauthenticated() {
    let options = RequestOptions::default();
    assert!(options.acting_role.is_none());
    assert!(options.bearer.is_none());
    assert!(options.content_type.is_none());
    assert!(matches!(options.body, RequestBody::Empty));
}

#[test]
fn test_multipart_field_constructors() {
    let fields = vec![
        MultipartField::text("name", "Tech University"),
        MultipartField::file("logo", "logo.png", "image/png", vec![1, 2, 3]),
    ];
    assert_eq!(fields[0].name, "name");
    assert_eq!(fields[1].name, "logo");
}

#[tokio::test]
async fn test_trait_helpers_shape_requests() {
    let api = Arc::new(MockApiClient::default());

    api.get("/universities", None).await.unwrap();
    api.post_json("/auth/login", None, json!({"email": "a@b.edu"}))
        .await
        .unwrap();
    api.delete("/universities/42", Some(Role::Admin)).await.unwrap();

    let calls = api.recorded();
    assert_eq!(calls.len(), 3);

    assert_eq!(calls[0].method, Method::GET);
    assert!(matches!(calls[0].options.body, RequestBody::Empty));

    assert_eq!(calls[1].method, Method::POST);
    assert!(matches!(calls[1].options.body, RequestBody::Json(_)));

    assert_eq!(calls[2].method, Method::DELETE);
    assert_eq!(calls[2].options.acting_role, Some(Role::Admin));
}
