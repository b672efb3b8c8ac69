// Typed wrappers over the University resource family and its siblings

use crate::api::{ApiClient, Method, MultipartField, RequestOptions};
use crate::auth::guard::ensure_role;
use crate::core::constants::endpoints;
use crate::core::errors::ClientError;
use crate::core::models::{ApiEnvelope, Event, FormOutcome, Role, Scholarship, University};
use crate::session::store::SessionStore;
use crate::validate::schemas;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

/// Logo image payload for university create/update
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields for creating or updating a university record
#[derive(Debug, Clone, Default)]
pub struct UniversityDraft {
    pub name: String,
    pub email: String,
    pub location: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub logo: Option<LogoUpload>,
}

impl UniversityDraft {
    fn as_form_value(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "location": self.location,
            "website": self.website,
            "description": self.description,
        })
    }

    fn into_multipart(self) -> Vec<MultipartField> {
        let mut fields = vec![
            MultipartField::text("name", self.name),
            MultipartField::text("email", self.email),
            MultipartField::text("location", self.location),
        ];
        if let Some(website) = self.website {
            fields.push(MultipartField::text("website", website));
        }
        if let Some(description) = self.description {
            fields.push(MultipartField::text("description", description));
        }
        if let Some(logo) = self.logo {
            fields.push(MultipartField::file(
                "logo",
                logo.filename,
                logo.content_type,
                logo.bytes,
            ));
        }
        fields
    }
}

/// Decode the `data` payload out of a `{success, message, data}` body
fn decode_data<T: DeserializeOwned>(body: Value) -> Result<T, ClientError> {
    let envelope: ApiEnvelope<T> = serde_json::from_value(body)
        .map_err(|e| ClientError::State(format!("Unexpected response shape: {}", e)))?;
    envelope
        .data
        .ok_or_else(|| ClientError::State("Response missing data payload".to_string()))
}

/// University resource calls. Reads are public; mutations are super-admin
/// operations gated on the stored admin credential.
pub struct UniversityApi {
    api: Arc<dyn ApiClient>,
    sessions: SessionStore,
}

impl UniversityApi {
    pub fn new(api: Arc<dyn ApiClient>, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    pub async fn list(&self) -> Result<Vec<University>, ClientError> {
        let body = self.api.get(endpoints::UNIVERSITIES, None).await?;
        decode_data(body)
    }

    pub async fn get(&self, id: &str) -> Result<University, ClientError> {
        let path = format!("{}/{}", endpoints::UNIVERSITIES, id);
        let body = self.api.get(&path, None).await?;
        decode_data(body)
    }

    /// Create a university. Sent as multipart when a logo is attached,
    /// plain JSON otherwise.
    pub async fn create(&self, draft: UniversityDraft) -> Result<FormOutcome<University>, ClientError> {
        ensure_role(&self.sessions, Role::Admin)?;

        let outcome = schemas::UNIVERSITY_PROFILE.validate(&draft.as_form_value());
        if let Some(errors) = outcome.errors() {
            return Ok(FormOutcome::Invalid(errors.clone()));
        }

        let options = if draft.logo.is_some() {
            RequestOptions::new()
                .acting_as(Role::Admin)
                .multipart(draft.into_multipart())
        } else {
            RequestOptions::new()
                .acting_as(Role::Admin)
                .json(draft.as_form_value())
        };

        let body = self
            .api
            .request(Method::POST, endpoints::UNIVERSITIES, options)
            .await?;
        Ok(FormOutcome::Submitted(decode_data(body)?))
    }

    pub async fn update(
        &self,
        id: &str,
        draft: UniversityDraft,
    ) -> Result<FormOutcome<University>, ClientError> {
        ensure_role(&self.sessions, Role::Admin)?;

        let outcome = schemas::UNIVERSITY_PROFILE.validate(&draft.as_form_value());
        if let Some(errors) = outcome.errors() {
            return Ok(FormOutcome::Invalid(errors.clone()));
        }

        let path = format!("{}/{}", endpoints::UNIVERSITIES, id);
        let options = if draft.logo.is_some() {
            RequestOptions::new()
                .acting_as(Role::Admin)
                .multipart(draft.into_multipart())
        } else {
            RequestOptions::new()
                .acting_as(Role::Admin)
                .json(draft.as_form_value())
        };

        let body = self.api.request(Method::PUT, &path, options).await?;
        Ok(FormOutcome::Submitted(decode_data(body)?))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        ensure_role(&self.sessions, Role::Admin)?;
        let path = format!("{}/{}", endpoints::UNIVERSITIES, id);
        self.api.delete(&path, Some(Role::Admin)).await?;
        Ok(())
    }

    /// Universities awaiting super-admin approval
    pub async fn pending(&self) -> Result<Vec<University>, ClientError> {
        ensure_role(&self.sessions, Role::Admin)?;
        let path = format!("{}/pending", endpoints::UNIVERSITIES);
        let body = self.api.get(&path, Some(Role::Admin)).await?;
        decode_data(body)
    }

    pub async fn approve(&self, id: &str) -> Result<University, ClientError> {
        ensure_role(&self.sessions, Role::Admin)?;
        let path = format!("{}/{}/approve", endpoints::UNIVERSITIES, id);
        let body = self
            .api
            .request(Method::POST, &path, RequestOptions::new().acting_as(Role::Admin))
            .await?;
        decode_data(body)
    }
}

/// Scholarship resource calls; mutations act as the university role
pub struct ScholarshipApi {
    api: Arc<dyn ApiClient>,
    sessions: SessionStore,
}

impl ScholarshipApi {
    pub fn new(api: Arc<dyn ApiClient>, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    pub async fn list(&self) -> Result<Vec<Scholarship>, ClientError> {
        let body = self.api.get(endpoints::SCHOLARSHIPS, None).await?;
        decode_data(body)
    }

    pub async fn create(&self, input: &Value) -> Result<FormOutcome<Scholarship>, ClientError> {
        ensure_role(&self.sessions, Role::University)?;

        let outcome = schemas::SCHOLARSHIP.validate(input);
        let data = match outcome.data() {
            Some(data) => data.clone(),
            None => {
                return Ok(FormOutcome::Invalid(
                    outcome.errors().cloned().unwrap_or_default(),
                ))
            }
        };

        let body = self
            .api
            .post_json(endpoints::SCHOLARSHIPS, Some(Role::University), data)
            .await?;
        Ok(FormOutcome::Submitted(decode_data(body)?))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        ensure_role(&self.sessions, Role::University)?;
        let path = format!("{}/{}", endpoints::SCHOLARSHIPS, id);
        self.api.delete(&path, Some(Role::University)).await?;
        Ok(())
    }
}

/// Event resource calls; mutations act as the university role
pub struct EventApi {
    api: Arc<dyn ApiClient>,
    sessions: SessionStore,
}

impl EventApi {
    pub fn new(api: Arc<dyn ApiClient>, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    pub async fn list(&self) -> Result<Vec<Event>, ClientError> {
        let body = self.api.get(endpoints::EVENTS, None).await?;
        decode_data(body)
    }

    pub async fn create(&self, input: &Value) -> Result<FormOutcome<Event>, ClientError> {
        ensure_role(&self.sessions, Role::University)?;

        let outcome = schemas::EVENT.validate(input);
        let data = match outcome.data() {
            Some(data) => data.clone(),
            None => {
                return Ok(FormOutcome::Invalid(
                    outcome.errors().cloned().unwrap_or_default(),
                ))
            }
        };

        let body = self
            .api
            .post_json(endpoints::EVENTS, Some(Role::University), data)
            .await?;
        Ok(FormOutcome::Submitted(decode_data(body)?))
    }
}
