// HTTP implementation of the API client wrapper

use crate::api::{ApiClient, Method, MultipartValue, RequestBody, RequestOptions};
use crate::config::Config;
use crate::core::errors::ClientError;
use crate::session::store::SessionStore;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Authenticated HTTP client for the Unisphere backend.
///
/// Built once with pooled connections; every component holding it shares
/// the pool. The session store is injected so token lookup stays explicit.
pub struct HttpApiClient {
    http_client: reqwest::Client,
    base: String,
    sessions: SessionStore,
}

impl HttpApiClient {
    pub fn new(config: &Config, sessions: SessionStore) -> Result<Self, ClientError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let connect_timeout = Duration::from_secs(2); // Fail fast on connection

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            base: format!(
                "{}{}",
                config.api_base_url.trim_end_matches('/'),
                config.api_base_path
            ),
            sessions,
        })
    }

    /// Resolve an endpoint path against the fixed base, inserting the
    /// leading separator when absent
    fn resolve(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    fn build_multipart(fields: Vec<crate::api::MultipartField>) -> Result<multipart::Form, ClientError> {
        let mut form = multipart::Form::new();
        for field in fields {
            let part = match field.value {
                MultipartValue::Text(text) => multipart::Part::text(text),
                MultipartValue::File {
                    filename,
                    content_type,
                    bytes,
                } => multipart::Part::bytes(bytes)
                    .file_name(filename)
                    .mime_str(&content_type)
                    .map_err(|e| {
                        ClientError::Configuration(format!("Invalid multipart content type: {}", e))
                    })?,
            };
            form = form.part(field.name, part);
        }
        Ok(form)
    }

    /// Extract the human-readable message from a parsed error body
    fn error_message(body: &Value, status: u16) -> String {
        body.get("message")
            .and_then(Value::as_str)
            .or_else(|| body.get("error").and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Server error ({})", status))
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        let url = self.resolve(path);
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .header("X-Request-Id", &request_id);

        // Bearer token is attached only when explicitly supplied or when
        // the acting role has a stored credential; otherwise the request
        // goes out unauthenticated
        if let Some(ref token) = options.bearer {
            request = request.header("Authorization", token.authorization_value());
        } else if let Some(role) = options.acting_role {
            if let Some(credential) = self.sessions.credential(role)? {
                request = request.header("Authorization", credential.token.authorization_value());
            }
        }

        request = match options.body {
            RequestBody::Empty => {
                if let Some(ref content_type) = options.content_type {
                    request.header(CONTENT_TYPE, content_type)
                } else {
                    request
                }
            }
            RequestBody::Json(body) => {
                let content_type = options
                    .content_type
                    .as_deref()
                    .unwrap_or("application/json");
                request.header(CONTENT_TYPE, content_type).body(body.to_string())
            }
            // No content-type header here: the transport supplies the
            // boundary-delimited multipart one
            RequestBody::Multipart(fields) => request.multipart(Self::build_multipart(fields)?),
        };

        debug!(
            method = %method,
            url = %url,
            request_id = %request_id,
            "Issuing API request"
        );

        let response = request.send().await.map_err(|e| {
            error!(error = %e, url = %url, request_id = %request_id, "API request failed");
            if e.is_timeout() {
                ClientError::Transport(format!("Request timed out: {}", e))
            } else if e.is_connect() {
                ClientError::Transport("Connection failed".to_string())
            } else {
                ClientError::Transport(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let text = response.text().await.map_err(|e| {
            error!(error = %e, url = %url, "Failed to read response body");
            ClientError::Transport(format!("Failed to read response body: {}", e))
        })?;

        // A JSON body that fails to parse is treated as empty rather than
        // propagated; non-JSON bodies are wrapped in a {message} shape
        let body: Value = if content_type.contains("application/json") {
            serde_json::from_str(&text).unwrap_or_else(|_| json!({}))
        } else {
            json!({ "message": text })
        };

        if !status.is_success() {
            let message = Self::error_message(&body, status.as_u16());
            warn!(
                status = status.as_u16(),
                url = %url,
                request_id = %request_id,
                message = %message,
                "API request rejected"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(
            status = status.as_u16(),
            url = %url,
            request_id = %request_id,
            "API request completed"
        );

        Ok(body)
    }
}
