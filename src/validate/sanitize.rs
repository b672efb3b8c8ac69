// HTML-escaping sanitizer for values rendered from API or session data

use serde_json::Value;

/// Escape the five HTML-significant characters in a string for display.
///
/// Ampersand is substituted first so entities produced by the later
/// substitutions are not double-escaped.
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape a JSON value for display. Non-string input yields an empty
/// string, matching the lenient contract of the form layer this replaces.
pub fn escape_for_display(input: &Value) -> String {
    match input.as_str() {
        Some(s) => escape_text(s),
        None => String::new(),
    }
}
