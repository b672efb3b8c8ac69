// Shared constants: route paths, storage keys, endpoint paths

/// Application route paths used by guard and logout decisions
pub mod routes {
    /// Landing page for visitors who hold a credential for the wrong role
    pub const HOME: &str = "/";

    /// Entry point shown when no credential exists for any role
    pub const ROLE_SELECT: &str = "/select-role";

    /// Post-logout destination for super-admin sessions
    pub const ADMIN_LOGIN: &str = "/admin/login";
}

/// Persistent key/value store keys (legacy browser-storage layout)
///
/// The key names are fixed by the deployed web client; the store has no
/// schema versioning, so these must not change.
pub mod storage {
    pub const STUDENT_TOKEN: &str = "token";
    pub const STUDENT_USER: &str = "user";
    pub const UNIVERSITY_TOKEN: &str = "universityToken";
    pub const ADMIN_TOKEN: &str = "adminToken";
    pub const ADMIN_USER: &str = "adminUser";

    // Flat student profile fields mirrored next to the `user` blob
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PROFILE_IMAGE: &str = "profileImage";
}

/// Backend endpoint paths, resolved against the configured base path
pub mod endpoints {
    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";
    pub const LOGOUT: &str = "/auth/logout";
    pub const ADMIN_LOGOUT: &str = "/superadmin/logout";
    pub const FORGET_PASSWORD: &str = "/auth/forgetPassword";
    pub const RESET_PASSWORD: &str = "/auth/resetPassword";

    pub const UNIVERSITIES: &str = "/universities";
    pub const SCHOLARSHIPS: &str = "/scholarships";
    pub const EVENTS: &str = "/events";
}
