//! Error types for the application form.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::data::Field;

/// Errors raised while editing, submitting, or rendering the form.
#[derive(Debug, Error)]
pub enum FormError {
    /// Submission was rejected; carries the per-field messages.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(ErrorMap),

    /// The name does not belong to any form field.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The field holds a set and cannot be replaced as a single value.
    #[error("field {0} is not a scalar field")]
    NotScalar(Field),

    /// The value cannot be stored in the field.
    #[error("invalid value for field {field}: {message}")]
    InvalidValue { field: Field, message: String },

    /// The submitted snapshot could not be serialized.
    #[error("failed to serialize submitted data: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Validation messages keyed by field, at most one per field.
///
/// A field that is absent from the map is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: BTreeMap<Field, String>,
}

impl ErrorMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Returns whether every field is valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the message for a field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Returns the message for a field given its wire name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        name.parse::<Field>().ok().and_then(|field| self.get(field))
    }

    /// Returns whether the field has an error.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Iterates over the errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// Returns the fields that have errors, in field order.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }
}

impl std::fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, message) in &self.errors {
            map.serialize_entry(field.name(), message)?;
        }
        map.end()
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_message() {
        let mut errors = ErrorMap::new();
        errors.insert(Field::Email, "first");
        errors.insert(Field::Email, "Email is invalid");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some("Email is invalid"));
    }

    #[test]
    fn test_lookup_by_name() {
        let mut errors = ErrorMap::new();
        errors.insert(Field::PortfolioUrl, "Portfolio URL is invalid");
        assert_eq!(
            errors.get_by_name("portfolioURL"),
            Some("Portfolio URL is invalid")
        );
        assert_eq!(errors.get_by_name("fullName"), None);
        assert_eq!(errors.get_by_name("nope"), None);
    }

    #[test]
    fn test_iteration_follows_field_order() {
        let mut errors = ErrorMap::new();
        errors.insert(Field::PreferredInterviewTime, "b");
        errors.insert(Field::FullName, "a");
        assert_eq!(
            errors.fields(),
            vec![Field::FullName, Field::PreferredInterviewTime]
        );
    }

    #[test]
    fn test_display_and_json() {
        let mut errors = ErrorMap::new();
        errors.insert(Field::FullName, "Full Name is required");
        assert_eq!(errors.to_string(), "fullName: Full Name is required\n");

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"fullName":"Full Name is required"}"#);
    }

    #[test]
    fn test_validation_error_message() {
        let mut errors = ErrorMap::new();
        errors.insert(Field::FullName, "Full Name is required");
        errors.insert(Field::Email, "Email is invalid");
        let err = FormError::Validation(errors);
        assert_eq!(err.to_string(), "validation failed for 2 field(s)");
    }
}
