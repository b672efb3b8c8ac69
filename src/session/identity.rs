// Session-derived identity view-models (navbar data)

use crate::core::errors::ClientError;
use crate::core::models::Role;
use crate::session::store::SessionStore;
use crate::validate::sanitize::escape_text;

/// Display-ready identity info for one role's navigation bar.
///
/// Pure read over the session store; all text fields are HTML-escaped so
/// they can be rendered directly.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentitySummary {
    pub role: Role,
    pub signed_in: bool,
    pub display_name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl IdentitySummary {
    pub fn for_role(store: &SessionStore, role: Role) -> Result<Self, ClientError> {
        let credential = store.credential(role)?;

        let Some(credential) = credential else {
            return Ok(Self {
                role,
                signed_in: false,
                display_name: default_display_name(role).to_string(),
                email: None,
                avatar_url: None,
            });
        };

        let profile = credential.profile;
        let display_name = profile
            .name
            .as_deref()
            .map(escape_text)
            .unwrap_or_else(|| default_display_name(role).to_string());

        Ok(Self {
            role,
            signed_in: true,
            display_name,
            email: profile.email.as_deref().map(escape_text),
            avatar_url: profile.profile_image,
        })
    }
}

fn default_display_name(role: Role) -> &'static str {
    match role {
        Role::Student => "Student",
        Role::University => "University",
        Role::Admin => "Administrator",
    }
}
