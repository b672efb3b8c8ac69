// API client seam - trait + request descriptors

pub mod client;
pub mod resources;

use crate::core::errors::ClientError;
use crate::core::models::Role;
use serde_json::Value;

pub use client::HttpApiClient;
pub use reqwest::Method;

/// Outgoing request body. Multipart bodies deliberately carry no
/// content-type header; the transport supplies the boundary-delimited one.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<MultipartField>),
}

/// One part of a multipart payload
#[derive(Debug, Clone)]
pub struct MultipartField {
    pub name: String,
    pub value: MultipartValue,
}

#[derive(Debug, Clone)]
pub enum MultipartValue {
    Text(String),
    File {
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl MultipartField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: MultipartValue::Text(value.into()),
        }
    }

    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            value: MultipartValue::File {
                filename: filename.into(),
                content_type: content_type.into(),
                bytes,
            },
        }
    }
}

/// Per-request options for the client wrapper
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Role whose stored token (if any) authenticates the request
    pub acting_role: Option<Role>,
    /// Explicit token overriding the store lookup. Logout uses this: the
    /// invalidation call must carry the token captured before clearing.
    pub bearer: Option<crate::auth::token::BearerToken>,
    pub body: RequestBody,
    /// Explicit content type; overrides the JSON default, ignored for
    /// multipart bodies
    pub content_type: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            acting_role: None,
            bearer: None,
            body: RequestBody::Empty,
            content_type: None,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acting_as(mut self, role: Role) -> Self {
        self.acting_role = Some(role);
        self
    }

    pub fn bearer(mut self, token: crate::auth::token::BearerToken) -> Self {
        self.bearer = Some(token);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }
}

/// Shared client for authenticated requests against the backend.
///
/// Implementations normalize every response into a JSON body and every
/// failure into a `ClientError` with a human-readable message.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError>;

    async fn get(&self, path: &str, role: Option<Role>) -> Result<Value, ClientError> {
        let mut options = RequestOptions::new();
        options.acting_role = role;
        self.request(Method::GET, path, options).await
    }

    async fn post_json(
        &self,
        path: &str,
        role: Option<Role>,
        body: Value,
    ) -> Result<Value, ClientError> {
        let mut options = RequestOptions::new().json(body);
        options.acting_role = role;
        self.request(Method::POST, path, options).await
    }

    async fn delete(&self, path: &str, role: Option<Role>) -> Result<Value, ClientError> {
        let mut options = RequestOptions::new();
        options.acting_role = role;
        self.request(Method::DELETE, path, options).await
    }
}
