// Bearer token wrapper with memory protection and log-safe fingerprints

use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 fingerprint of a bearer token (64-character hex string)
///
/// Audit logs carry fingerprints, never the token itself. The fingerprint
/// is deterministic: the same token always produces the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenFingerprint(String);

impl TokenFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque bearer token issued by the backend on login
///
/// Uses `secrecy::Secret` so the raw token cannot leak through Debug
/// formatting or accidental logging.
#[derive(Clone)]
pub struct BearerToken(Secret<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token.into()))
    }

    /// Value for the `Authorization` request header
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }

    /// Expose the raw token (use with caution)
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Hash the token for audit logging
    pub fn fingerprint(&self) -> TokenFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(self.0.expose_secret().as_bytes());
        TokenFingerprint(hex::encode(hasher.finalize()))
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"<REDACTED>")
            .finish()
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<REDACTED>")
    }
}
