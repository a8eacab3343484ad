//! Field-level validation failures.
//!
//! Collected per field in insertion-independent (sorted) order so the
//! rendered error body is stable across runs.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Maximum length accepted for short text attributes such as names.
pub const MAX_NAME_LENGTH: usize = 255;

/// A set of validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for a field, empty if the field passed.
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Convert into `Err(self)` when any message was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .fields
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

/// Check a required text attribute with a length limit.
///
/// Returns `false` when the value is missing so callers can skip rules
/// that only make sense for a present value.
pub fn require_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> bool {
    match value.map(str::trim) {
        None | Some("") => {
            errors.add(field, format!("The {field} field is required."));
            false
        }
        Some(v) => {
            if v.chars().count() > max_len {
                errors.add(
                    field,
                    format!("The {field} field must not be greater than {max_len} characters."),
                );
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_pass() {
        let errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn test_messages_grouped_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "first");
        errors.add("name", "second");
        errors.add("description", "third");

        assert_eq!(errors.messages("name"), ["first", "second"]);
        assert_eq!(errors.messages("description"), ["third"]);
        assert!(errors.messages("missing").is_empty());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["description", "name"]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "The name field is required.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"name": ["The name field is required."]}));
    }

    #[test]
    fn test_require_text_rules() {
        let mut errors = ValidationErrors::new();
        assert!(!require_text(&mut errors, "name", None, 10));
        assert!(!require_text(&mut errors, "name", Some("   "), 10));
        assert_eq!(errors.messages("name").len(), 2);

        let mut errors = ValidationErrors::new();
        assert!(require_text(&mut errors, "name", Some("abcdefghijk"), 10));
        assert_eq!(
            errors.messages("name"),
            ["The name field must not be greater than 10 characters."]
        );

        let mut errors = ValidationErrors::new();
        assert!(require_text(&mut errors, "name", Some("Math"), 10));
        assert!(errors.is_empty());
    }
}
