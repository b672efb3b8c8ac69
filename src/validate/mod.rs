pub mod rules;
pub mod sanitize;
pub mod schemas;

pub use rules::{CrossRule, Field, Schema, ValidationOutcome};
pub use sanitize::{escape_for_display, escape_text};
