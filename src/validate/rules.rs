// Declarative form validation - per-field rules, cross-field checks,
// first failing message per path

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // Permissive on purpose: the backend is the authority on deliverability
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// A single field constraint with its user-facing message
#[derive(Debug, Clone)]
enum Rule {
    Required,
    MinLen(usize),
    MaxLen(usize),
    Email,
    Matches(&'static Lazy<Regex>),
    Numeric,
    /// Inclusive lower bound
    Min(f64),
    /// Inclusive upper bound
    Max(f64),
    OneOf(&'static [&'static str]),
}

/// How a field's raw value is interpreted before rule evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Number,
}

/// Declarative rule set for one field path.
///
/// Rules are evaluated in declaration order and evaluation stops at the
/// first failure, so only that rule's message is ever reported for the
/// field. Later same-path rules are shadowed; that matches the behavior
/// of the form layer this replaces.
#[derive(Debug, Clone)]
pub struct Field {
    path: &'static str,
    kind: FieldKind,
    rules: Vec<(Rule, String)>,
}

impl Field {
    pub fn text(path: &'static str) -> Self {
        Self {
            path,
            kind: FieldKind::Text,
            rules: Vec::new(),
        }
    }

    pub fn number(path: &'static str) -> Self {
        Self {
            path,
            kind: FieldKind::Number,
            rules: Vec::new(),
        }
    }

    pub fn required(mut self, message: &str) -> Self {
        self.rules.push((Rule::Required, message.to_string()));
        self
    }

    pub fn min_len(mut self, len: usize, message: &str) -> Self {
        self.rules.push((Rule::MinLen(len), message.to_string()));
        self
    }

    pub fn max_len(mut self, len: usize, message: &str) -> Self {
        self.rules.push((Rule::MaxLen(len), message.to_string()));
        self
    }

    pub fn email(mut self, message: &str) -> Self {
        self.rules.push((Rule::Email, message.to_string()));
        self
    }

    pub fn matches(mut self, pattern: &'static Lazy<Regex>, message: &str) -> Self {
        self.rules.push((Rule::Matches(pattern), message.to_string()));
        self
    }

    pub fn numeric(mut self, message: &str) -> Self {
        self.rules.push((Rule::Numeric, message.to_string()));
        self
    }

    pub fn min(mut self, bound: f64, message: &str) -> Self {
        self.rules.push((Rule::Min(bound), message.to_string()));
        self
    }

    pub fn max(mut self, bound: f64, message: &str) -> Self {
        self.rules.push((Rule::Max(bound), message.to_string()));
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str], message: &str) -> Self {
        self.rules.push((Rule::OneOf(allowed), message.to_string()));
        self
    }
}

/// Whole-object check evaluated after all per-field rules
#[derive(Debug, Clone)]
enum CrossCheck {
    /// Trimmed values at both paths must be equal
    FieldsEqual {
        left: &'static str,
        right: &'static str,
    },
}

/// Cross-field rule attaching its failure to a designated field path
#[derive(Debug, Clone)]
pub struct CrossRule {
    path: &'static str,
    message: String,
    check: CrossCheck,
}

impl CrossRule {
    /// Require two fields to hold the same trimmed value. The failure is
    /// keyed at `attach_to` (typically the confirmation field).
    pub fn fields_equal(
        left: &'static str,
        right: &'static str,
        attach_to: &'static str,
        message: &str,
    ) -> Self {
        Self {
            path: attach_to,
            message: message.to_string(),
            check: CrossCheck::FieldsEqual { left, right },
        }
    }
}

/// Result of validating one submission. Never persisted; recomputed per
/// submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// All rules passed; `data` is the normalized (trimmed, parsed) copy
    Valid { data: Value },
    /// One message per failing field path, first-encountered retained
    Invalid { errors: BTreeMap<String, String> },
}

impl ValidationOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ValidationOutcome::Valid { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ValidationOutcome::Valid { data } => Some(data),
            ValidationOutcome::Invalid { .. } => None,
        }
    }

    pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ValidationOutcome::Valid { .. } => None,
            ValidationOutcome::Invalid { errors } => Some(errors),
        }
    }
}

/// Immutable per-entity rule set
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
    cross: Vec<CrossRule>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            cross: Vec::new(),
        }
    }

    pub fn with_cross(mut self, rule: CrossRule) -> Self {
        self.cross.push(rule);
        self
    }

    /// Validate a candidate object against this schema.
    ///
    /// Pure function over its inputs. A non-object candidate is treated
    /// as an object with every field absent.
    pub fn validate(&self, data: &Value) -> ValidationOutcome {
        static EMPTY: Lazy<Map<String, Value>> = Lazy::new(Map::new);
        let object = data.as_object().unwrap_or(&EMPTY);

        let mut errors: BTreeMap<String, String> = BTreeMap::new();
        let mut normalized = Value::Object(object.clone());

        for field in &self.fields {
            let raw = lookup_path(object, field.path);
            match evaluate_field(field, raw.as_ref()) {
                Ok(Some(value)) => set_path(&mut normalized, field.path, value),
                Ok(None) => {}
                Err(message) => {
                    errors.entry(field.path.to_string()).or_insert(message);
                }
            }
        }

        for rule in &self.cross {
            if !cross_check_passes(&rule.check, object) {
                // Earlier per-field messages for the same path win
                errors
                    .entry(rule.path.to_string())
                    .or_insert_with(|| rule.message.clone());
            }
        }

        if errors.is_empty() {
            ValidationOutcome::Valid { data: normalized }
        } else {
            ValidationOutcome::Invalid { errors }
        }
    }
}

/// Evaluate one field. Returns the normalized value to substitute into
/// the output (None when the field is absent and passes), or the first
/// failing rule's message.
fn evaluate_field(field: &Field, raw: Option<&Value>) -> Result<Option<Value>, String> {
    let text = coerce_text(raw);
    let trimmed = text.trim();
    let number = parse_number(raw, trimmed);

    for (rule, message) in &field.rules {
        let passed = match rule {
            Rule::Required => !trimmed.is_empty(),
            // Format and bound checks only apply to present values; an
            // absent optional field passes them
            Rule::MinLen(len) => trimmed.is_empty() || trimmed.chars().count() >= *len,
            Rule::MaxLen(len) => trimmed.is_empty() || trimmed.chars().count() <= *len,
            Rule::Email => trimmed.is_empty() || EMAIL_RE.is_match(trimmed),
            Rule::Matches(pattern) => trimmed.is_empty() || pattern.is_match(trimmed),
            Rule::OneOf(allowed) => trimmed.is_empty() || allowed.contains(&trimmed),
            Rule::Numeric => trimmed.is_empty() || number.is_some(),
            Rule::Min(bound) => trimmed.is_empty() || number.map_or(true, |n| n >= *bound),
            Rule::Max(bound) => trimmed.is_empty() || number.map_or(true, |n| n <= *bound),
        };

        if !passed {
            return Err(message.clone());
        }
    }

    if trimmed.is_empty() && raw.is_none() {
        return Ok(None);
    }

    let value = match field.kind {
        FieldKind::Text => Value::String(trimmed.to_string()),
        FieldKind::Number => match number.and_then(serde_json::Number::from_f64) {
            Some(n) => Value::Number(n),
            None => Value::String(trimmed.to_string()),
        },
    };

    Ok(Some(value))
}

/// A field absent entirely is treated as the empty string
fn coerce_text(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn parse_number(raw: Option<&Value>, trimmed: &str) -> Option<f64> {
    match raw {
        Some(Value::Number(n)) => n.as_f64(),
        _ => trimmed.parse::<f64>().ok(),
    }
}

fn cross_check_passes(check: &CrossCheck, object: &Map<String, Value>) -> bool {
    match check {
        CrossCheck::FieldsEqual { left, right } => {
            let a = coerce_text(lookup_path(object, left).as_ref());
            let b = coerce_text(lookup_path(object, right).as_ref());
            a.trim() == b.trim()
        }
    }
}

/// Resolve a dotted field path against an object
fn lookup_path(object: &Map<String, Value>, path: &str) -> Option<Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = object.get(first)?.clone();

    for segment in segments {
        current = current.as_object()?.get(segment)?.clone();
    }

    Some(current)
}

/// Write a normalized value back at a dotted path, creating intermediate
/// objects as needed
fn set_path(target: &mut Value, path: &str, value: Value) {
    let mut current = target;
    let segments: Vec<&str> = path.split('.').collect();

    for (i, segment) in segments.iter().enumerate() {
        let object = match current.as_object_mut() {
            Some(object) => object,
            None => return,
        };

        if i == segments.len() - 1 {
            object.insert(segment.to_string(), value);
            return;
        }

        current = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}
