// Core domain models shared across session, auth, and API layers

use crate::auth::token::BearerToken;
use crate::core::constants::{endpoints, routes, storage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor role. Closed set - the guard matches exhaustively on this,
/// so a typo'd role string cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    University,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::University, Role::Admin];

    /// Storage key holding this role's bearer token
    pub fn token_key(&self) -> &'static str {
        match self {
            Role::Student => storage::STUDENT_TOKEN,
            Role::University => storage::UNIVERSITY_TOKEN,
            Role::Admin => storage::ADMIN_TOKEN,
        }
    }

    /// Storage key holding this role's cached profile blob, if it has one.
    /// The deployed web client never cached a university profile blob.
    pub fn profile_key(&self) -> Option<&'static str> {
        match self {
            Role::Student => Some(storage::STUDENT_USER),
            Role::University => None,
            Role::Admin => Some(storage::ADMIN_USER),
        }
    }

    /// Backend endpoint invalidating this role's server-side session
    pub fn logout_endpoint(&self) -> &'static str {
        match self {
            Role::Admin => endpoints::ADMIN_LOGOUT,
            Role::Student | Role::University => endpoints::LOGOUT,
        }
    }

    /// Where the client navigates after local logout completes
    pub fn post_logout_route(&self) -> &'static str {
        match self {
            Role::Admin => routes::ADMIN_LOGIN,
            Role::Student | Role::University => routes::HOME,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Student => "student",
            Role::University => "university",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}

/// Cached user-profile fragment stored alongside a token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "profileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// One role's active session: an opaque bearer token plus the profile
/// fragment cached at login time. No expiry is tracked client-side.
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: BearerToken,
    pub profile: Profile,
}

impl Credential {
    pub fn new(token: impl Into<String>, profile: Profile) -> Self {
        Self {
            token: BearerToken::new(token),
            profile,
        }
    }
}

/// Which roles currently hold a credential. Input to the route guard;
/// derived from the session store, then immutable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub student: bool,
    pub university: bool,
    pub admin: bool,
}

impl SessionSnapshot {
    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Student => self.student,
            Role::University => self.university,
            Role::Admin => self.admin,
        }
    }

    pub fn any(&self) -> bool {
        self.student || self.university || self.admin
    }
}

/// Outcome of a route guard decision. Pure value - no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(&'static str),
}

impl RouteDecision {
    pub fn renders(&self) -> bool {
        matches!(self, RouteDecision::Render)
    }

    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            RouteDecision::Render => None,
            RouteDecision::Redirect(to) => Some(to),
        }
    }
}

/// Result of submitting a form-backed operation. Validation failures are
/// data for inline display, never errors; only API/transport failures
/// leave the form boundary as `ClientError`.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<T> {
    /// One message per failing field path
    Invalid(std::collections::BTreeMap<String, String>),
    Submitted(T),
}

impl<T> FormOutcome<T> {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FormOutcome::Invalid(_))
    }
}

/// Standard `{success, message, data}` response body shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// University record as returned by the resource endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct University {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub approved: bool,
}

/// Scholarship record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scholarship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(rename = "universityId", default, skip_serializing_if = "Option::is_none")]
    pub university_id: Option<String>,
}

/// Event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub location: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}
