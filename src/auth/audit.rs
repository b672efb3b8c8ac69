// Auth event logging

use crate::auth::token::TokenFingerprint;
use crate::core::models::Role;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Authentication event type
#[derive(Debug, Clone)]
pub enum AuthEvent {
    LoginSuccess { role: Role },
    LoginFailure { role: Role, reason: String },
    /// Local credential cleared; always follows a logout regardless of
    /// what the invalidation endpoint did
    LogoutCompleted { role: Role },
    /// Outcome of the best-effort server-side invalidation call
    LogoutInvalidation { role: Role, outcome: Result<(), String> },
}

/// Audit logger for authentication events.
///
/// Emits structured logs only; tokens appear exclusively as fingerprints.
pub struct AuditLogger;

impl AuditLogger {
    pub fn new() -> Self {
        Self
    }

    pub fn log_auth_event(&self, event: AuthEvent, fingerprint: Option<&TokenFingerprint>) {
        let occurred_at: DateTime<Utc> = Utc::now();
        let fingerprint = fingerprint.map(TokenFingerprint::as_str);

        match event {
            AuthEvent::LoginSuccess { role } => {
                info!(
                    role = %role,
                    token_fingerprint = ?fingerprint,
                    occurred_at = %occurred_at,
                    "Login successful"
                );
            }
            AuthEvent::LoginFailure { role, ref reason } => {
                warn!(
                    role = %role,
                    reason = %reason,
                    occurred_at = %occurred_at,
                    "Login failed"
                );
            }
            AuthEvent::LogoutCompleted { role } => {
                info!(
                    role = %role,
                    token_fingerprint = ?fingerprint,
                    occurred_at = %occurred_at,
                    "Local session cleared"
                );
            }
            AuthEvent::LogoutInvalidation { role, ref outcome } => match outcome {
                Ok(()) => {
                    info!(
                        role = %role,
                        token_fingerprint = ?fingerprint,
                        occurred_at = %occurred_at,
                        "Server-side session invalidated"
                    );
                }
                Err(reason) => {
                    warn!(
                        role = %role,
                        token_fingerprint = ?fingerprint,
                        reason = %reason,
                        occurred_at = %occurred_at,
                        "Server-side session invalidation failed; local logout already complete"
                    );
                }
            },
        }
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}
