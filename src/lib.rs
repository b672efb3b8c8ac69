//! unisphere-client: headless client core for the Unisphere platform.
//!
//! Provides the session store, role guard, form validation, and
//! authenticated API client the role-scoped UI surfaces are built on.
//! Rendering, routing tables, and the REST backend itself live elsewhere.

pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod session;
pub mod validate;
