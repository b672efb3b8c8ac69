// Domain error types - every failure surfaces as a message or redirect, never a crash

use crate::core::models::Role;
use thiserror::Error;

/// Main error type for the client core
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend returned a non-success HTTP status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Network-level failure (connection refused, timeout, DNS)
    #[error("Request failed: {0}")]
    Transport(String),

    /// A role-gated operation was attempted without a stored credential
    #[error("No active session for role '{0}'")]
    MissingCredential(Role),

    /// Session store read/write failure
    #[error("Session state error: {0}")]
    State(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// True for 401/403 responses - the trigger for a forced logout.
    ///
    /// Token freshness is never checked client-side; staleness is only
    /// discovered here, on a rejected authenticated request.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ClientError::Api { status: 401 | 403, .. })
    }

    /// Get user-facing error message (no transport internals)
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(_) => "Network error. Please try again.".to_string(),
            ClientError::MissingCredential(_) => "Please log in to continue.".to_string(),
            ClientError::State(_) => "Internal error".to_string(),
            ClientError::Configuration(_) => "Internal error".to_string(),
        }
    }
}
