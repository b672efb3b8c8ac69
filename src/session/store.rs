// Role-scoped session credential accessors over the key/value store

use crate::config::Config;
use crate::core::constants::storage;
use crate::core::errors::ClientError;
use crate::core::models::{Credential, Profile, Role, SessionSnapshot};
use crate::session::kv::{FileKvStore, KvStore};
use std::sync::Arc;
use tracing::warn;

/// Session store: the single source of truth for "is this client logged in".
///
/// Wraps the persistent key/value store with the role-to-key mapping the
/// deployed web client used. Injected explicitly into every component that
/// reads or writes session state - there is no ambient global.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KvStore>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Open the file-backed store at the configured path
    pub fn open(config: &Config) -> Result<Self, ClientError> {
        Ok(Self::new(Arc::new(FileKvStore::open(
            &config.session_file_path,
        )?)))
    }

    /// Get the stored credential for a role, if one exists.
    ///
    /// An empty token value is treated as absent. A profile blob that no
    /// longer parses is logged and degraded to an empty profile rather
    /// than failing the read - the token is what decides login state.
    pub fn credential(&self, role: Role) -> Result<Option<Credential>, ClientError> {
        let token = match self.kv.get(role.token_key())? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };

        Ok(Some(Credential::new(token, self.profile(role)?)))
    }

    /// Cached profile fragment for a role. Falls back to the flat legacy
    /// fields for the student role when no blob is present.
    pub fn profile(&self, role: Role) -> Result<Profile, ClientError> {
        if let Some(key) = role.profile_key() {
            if let Some(raw) = self.kv.get(key)? {
                match serde_json::from_str::<Profile>(&raw) {
                    Ok(profile) => return Ok(profile),
                    Err(e) => {
                        warn!(role = %role, error = %e, "Discarding unparsable cached profile");
                    }
                }
            }
        }

        if role == Role::Student {
            return Ok(Profile {
                name: self.kv.get(storage::NAME)?,
                email: self.kv.get(storage::EMAIL)?,
                profile_image: self.kv.get(storage::PROFILE_IMAGE)?,
            });
        }

        Ok(Profile::default())
    }

    /// Store a credential for a role, replacing any existing one
    pub fn set_credential(&self, role: Role, credential: &Credential) -> Result<(), ClientError> {
        self.kv.set(role.token_key(), credential.token.expose())?;

        if let Some(key) = role.profile_key() {
            let blob = serde_json::to_string(&credential.profile)
                .map_err(|e| ClientError::State(format!("Failed to serialize profile: {}", e)))?;
            self.kv.set(key, &blob)?;
        }

        if role == Role::Student {
            self.mirror_student_fields(&credential.profile)?;
        }

        Ok(())
    }

    /// Remove a role's credential and cached profile fields
    pub fn clear_credential(&self, role: Role) -> Result<(), ClientError> {
        self.kv.remove(role.token_key())?;

        if let Some(key) = role.profile_key() {
            self.kv.remove(key)?;
        }

        if role == Role::Student {
            self.kv.remove(storage::NAME)?;
            self.kv.remove(storage::EMAIL)?;
            self.kv.remove(storage::PROFILE_IMAGE)?;
        }

        Ok(())
    }

    /// Which roles currently hold a credential
    pub fn snapshot(&self) -> Result<SessionSnapshot, ClientError> {
        Ok(SessionSnapshot {
            student: self.credential(Role::Student)?.is_some(),
            university: self.credential(Role::University)?.is_some(),
            admin: self.credential(Role::Admin)?.is_some(),
        })
    }

    // The web client kept student name/email/avatar as flat keys next to
    // the `user` blob; both must stay in sync for the legacy layout.
    fn mirror_student_fields(&self, profile: &Profile) -> Result<(), ClientError> {
        if let Some(ref name) = profile.name {
            self.kv.set(storage::NAME, name)?;
        }
        if let Some(ref email) = profile.email {
            self.kv.set(storage::EMAIL, email)?;
        }
        if let Some(ref image) = profile.profile_image {
            self.kv.set(storage::PROFILE_IMAGE, image)?;
        }
        Ok(())
    }
}
