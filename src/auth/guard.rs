// Route guard - gates protected UI on which credentials exist

use crate::core::constants::routes;
use crate::core::errors::ClientError;
use crate::core::models::{Credential, Role, RouteDecision, SessionSnapshot};
use crate::session::store::SessionStore;

/// Decide whether a protected view renders or redirects.
///
/// Pure function of the credential snapshot and the requested role; it
/// never errors and never touches the store. Token freshness is not
/// checked here - the backend rejects stale tokens on the next
/// authenticated request.
pub fn decide(required: Option<Role>, snapshot: &SessionSnapshot) -> RouteDecision {
    match required {
        Some(role) if snapshot.has(role) => RouteDecision::Render,
        None if snapshot.any() => RouteDecision::Render,
        _ if !snapshot.any() => RouteDecision::Redirect(routes::ROLE_SELECT),
        // Logged in, but as some other role
        _ => RouteDecision::Redirect(routes::HOME),
    }
}

/// Imperative companion to `decide` for role-gated API calls: returns the
/// stored credential or a `MissingCredential` error the caller surfaces
/// as a redirect.
pub fn ensure_role(store: &SessionStore, role: Role) -> Result<Credential, ClientError> {
    store
        .credential(role)?
        .ok_or(ClientError::MissingCredential(role))
}
