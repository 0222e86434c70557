//! Field-level validation errors.
//!
//! [`FieldErrors`] is the single shape used for rejected input everywhere:
//! validators in this crate produce it, the API serializes it under
//! `"errors"`, and the projects page reads it back to show messages inline.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// Messages keyed by field name. Serializes as `{"field": ["msg", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Take every field recorded in `other`, dropping whatever messages
    /// `self` already had for those fields.
    pub fn replace(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All messages recorded for `field`, in insertion order.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// The first message for `field`, which is what a form shows inline.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Names of the fields that have at least one message.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total number of messages across all fields.
    pub fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// One-line summary: the first message, plus how many others exist.
    ///
    /// `"The name field is required. (and 1 more error)"`
    pub fn summary(&self) -> String {
        let Some(first) = self.0.values().flatten().next() else {
            return "The given data was invalid.".to_string();
        };
        match self.message_count() - 1 {
            0 => first.clone(),
            1 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {n} more errors)"),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| format!("The {field} field is invalid."));
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_groups_messages_by_field() {
        let mut errors = FieldErrors::new();
        errors.add("name", "first");
        errors.add("name", "second");
        errors.add("status", "bad");

        assert_eq!(errors.get("name").unwrap(), ["first", "second"]);
        assert_eq!(errors.first("status"), Some("bad"));
        assert_eq!(errors.message_count(), 3);
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["name", "status"]);
    }

    #[test]
    fn test_replace_overrides_only_named_fields() {
        let mut errors = FieldErrors::new();
        errors.add("name", "The name field is required.");
        errors.add("status", "The status field is required.");

        let mut typed = FieldErrors::new();
        typed.add("name", "The name field must be a string.");
        errors.replace(typed);

        assert_eq!(errors.get("name").unwrap(), ["The name field must be a string."]);
        assert_eq!(errors.first("status"), Some("The status field is required."));
    }

    #[test]
    fn test_summary_counts_remaining_messages() {
        let mut errors = FieldErrors::new();
        errors.add("name", "The name field is required.");
        assert_eq!(errors.summary(), "The name field is required.");

        errors.add("status", "The status field is required.");
        assert_eq!(
            errors.summary(),
            "The name field is required. (and 1 more error)"
        );
    }

    #[test]
    fn test_empty_summary_is_generic() {
        assert_eq!(FieldErrors::new().summary(), "The given data was invalid.");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.add("status", "The selected status is invalid.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": ["The selected status is invalid."]})
        );

        let back: FieldErrors = serde_json::from_value(json).unwrap();
        assert_eq!(back, errors);
    }

    #[test]
    fn test_display_lists_every_message() {
        let mut errors = FieldErrors::new();
        errors.add("name", "too long");
        errors.add("status", "invalid");
        assert_eq!(errors.to_string(), "name: too long; status: invalid");
    }
}
