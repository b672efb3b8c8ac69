// Authentication flows: login, logout, registration, OTP password reset

use crate::api::{ApiClient, Method, RequestOptions};
use crate::auth::audit::{AuditLogger, AuthEvent};
use crate::auth::token::TokenFingerprint;
use crate::core::constants::endpoints;
use crate::core::errors::ClientError;
use crate::core::models::{Credential, FormOutcome, Profile, Role};
use crate::session::store::SessionStore;
use crate::validate::schemas;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// What a completed logout hands back to the caller
#[derive(Debug)]
pub struct LogoutOutcome {
    /// Role-appropriate post-logout navigation target
    pub redirect_to: &'static str,
    /// Handle of the detached invalidation task, if one was spawned.
    /// Only tests await it; the flow itself never does.
    pub invalidation: Option<JoinHandle<()>>,
}

/// Authentication flows over injected session state and API client
pub struct AuthFlows {
    api: Arc<dyn ApiClient>,
    sessions: SessionStore,
    audit: Arc<AuditLogger>,
}

impl AuthFlows {
    pub fn new(api: Arc<dyn ApiClient>, sessions: SessionStore, audit: Arc<AuditLogger>) -> Self {
        Self {
            api,
            sessions,
            audit,
        }
    }

    /// Log in for a role. On success the credential and profile fragment
    /// are stored; the caller re-derives UI state from the session store.
    pub async fn login(&self, role: Role, input: &Value) -> Result<FormOutcome<Profile>, ClientError> {
        let data = match schemas::LOGIN.validate(input) {
            outcome if outcome.success() => outcome.data().cloned().unwrap_or_else(|| json!({})),
            outcome => {
                return Ok(FormOutcome::Invalid(
                    outcome.errors().cloned().unwrap_or_default(),
                ))
            }
        };

        let mut payload = data;
        payload["role"] = json!(role);

        let body = match self.api.post_json(endpoints::LOGIN, None, payload).await {
            Ok(body) => body,
            Err(e) => {
                self.audit.log_auth_event(
                    AuthEvent::LoginFailure {
                        role,
                        reason: e.user_message(),
                    },
                    None,
                );
                return Err(e);
            }
        };

        let data = body.get("data").cloned().unwrap_or_else(|| json!({}));
        let token = data
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::State("Login response missing token".to_string()))?
            .to_string();

        let profile = extract_profile(&data);
        let credential = Credential::new(token, profile.clone());
        let fingerprint = credential.token.fingerprint();

        self.sessions.set_credential(role, &credential)?;
        self.audit
            .log_auth_event(AuthEvent::LoginSuccess { role }, Some(&fingerprint));

        Ok(FormOutcome::Submitted(profile))
    }

    /// Register a new student or university account. Admin accounts are
    /// provisioned server-side and have no registration form.
    pub async fn register(&self, role: Role, input: &Value) -> Result<FormOutcome<String>, ClientError> {
        let schema = match role {
            Role::Student => &schemas::STUDENT_REGISTRATION,
            Role::University => &schemas::UNIVERSITY_REGISTRATION,
            Role::Admin => {
                return Err(ClientError::Configuration(
                    "Admin accounts cannot be registered".to_string(),
                ))
            }
        };

        let data = match schema.validate(input) {
            outcome if outcome.success() => outcome.data().cloned().unwrap_or_else(|| json!({})),
            outcome => {
                return Ok(FormOutcome::Invalid(
                    outcome.errors().cloned().unwrap_or_default(),
                ))
            }
        };

        let mut payload = data;
        payload["role"] = json!(role);

        let body = self.api.post_json(endpoints::REGISTER, None, payload).await?;
        Ok(FormOutcome::Submitted(envelope_message(
            &body,
            "Registration successful",
        )))
    }

    /// Two-phase, best-effort logout.
    ///
    /// Phase 1 issues the role-appropriate invalidation request as a
    /// detached task whose outcome is only logged. Phase 2 clears the
    /// local credential unconditionally - local session termination is
    /// never blocked by backend availability.
    pub async fn logout(&self, role: Role) -> Result<LogoutOutcome, ClientError> {
        let credential = self.sessions.credential(role)?;
        let fingerprint: Option<TokenFingerprint> =
            credential.as_ref().map(|c| c.token.fingerprint());

        let invalidation = credential.map(|credential| {
            let api = Arc::clone(&self.api);
            let audit = Arc::clone(&self.audit);
            let token = credential.token;
            let fingerprint = token.fingerprint();

            tokio::spawn(async move {
                let outcome = api
                    .request(
                        Method::POST,
                        role.logout_endpoint(),
                        RequestOptions::new().bearer(token),
                    )
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string());

                audit.log_auth_event(
                    AuthEvent::LogoutInvalidation { role, outcome },
                    Some(&fingerprint),
                );
            })
        });

        // Runs regardless of what the detached task does
        self.sessions.clear_credential(role)?;
        self.audit
            .log_auth_event(AuthEvent::LogoutCompleted { role }, fingerprint.as_ref());

        Ok(LogoutOutcome {
            redirect_to: role.post_logout_route(),
            invalidation,
        })
    }

    /// Request a one-time password for the reset flow
    pub async fn request_password_otp(&self, input: &Value) -> Result<FormOutcome<String>, ClientError> {
        let data = match schemas::OTP_REQUEST.validate(input) {
            outcome if outcome.success() => outcome.data().cloned().unwrap_or_else(|| json!({})),
            outcome => {
                return Ok(FormOutcome::Invalid(
                    outcome.errors().cloned().unwrap_or_default(),
                ))
            }
        };

        let body = self
            .api
            .post_json(endpoints::FORGET_PASSWORD, None, data)
            .await?;
        Ok(FormOutcome::Submitted(envelope_message(
            &body,
            "OTP sent to your email",
        )))
    }

    /// Complete the password reset with the emailed OTP
    pub async fn reset_password(&self, input: &Value) -> Result<FormOutcome<String>, ClientError> {
        let data = match schemas::PASSWORD_RESET.validate(input) {
            outcome if outcome.success() => outcome.data().cloned().unwrap_or_else(|| json!({})),
            outcome => {
                return Ok(FormOutcome::Invalid(
                    outcome.errors().cloned().unwrap_or_default(),
                ))
            }
        };

        // The confirmation field is a client-side check only
        let mut payload = data;
        if let Some(object) = payload.as_object_mut() {
            object.remove("confirmPassword");
        }

        let body = self
            .api
            .post_json(endpoints::RESET_PASSWORD, None, payload)
            .await?;
        Ok(FormOutcome::Submitted(envelope_message(
            &body,
            "Password updated",
        )))
    }
}

/// Profile fragment from a login response: prefer the `user` blob, fall
/// back to top-level fields the older backend versions used
fn extract_profile(data: &Value) -> Profile {
    let mut profile = data
        .get("user")
        .cloned()
        .and_then(|user| serde_json::from_value::<Profile>(user).ok())
        .unwrap_or_default();

    if profile.name.is_none() {
        profile.name = data.get("name").and_then(Value::as_str).map(str::to_string);
    }
    if profile.email.is_none() {
        profile.email = data.get("email").and_then(Value::as_str).map(str::to_string);
    }
    if profile.profile_image.is_none() {
        profile.profile_image = data
            .get("profileImage")
            .and_then(Value::as_str)
            .map(str::to_string);
    }

    profile
}

fn envelope_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}
