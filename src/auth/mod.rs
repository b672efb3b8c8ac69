pub mod audit;
pub mod flows;
pub mod guard;
pub mod token;

pub use flows::{AuthFlows, LogoutOutcome};
pub use guard::{decide, ensure_role};
pub use token::{BearerToken, TokenFingerprint};
