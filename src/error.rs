//! Error types for form validation and settings loading.
//!
//! Form errors are user-input errors: they are accumulated with stillwater's
//! `Validation`, turned into an [`ErrorSet`] and rendered next to the
//! offending field. They never cross into other components.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use stillwater::{NonEmptyVec, Semigroup, Validation};
use thiserror::Error;

use crate::field::FieldName;
use crate::settings::Messages;

/// A single reason why a form field is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A required field was empty after trimming.
    RequiredFieldMissing { field: FieldName },

    /// The email field was filled in but does not look like an address.
    InvalidEmailFormat { field: FieldName, value: String },
}

impl FieldError {
    /// The field this error belongs to.
    pub fn field(&self) -> FieldName {
        match self {
            FieldError::RequiredFieldMissing { field } => *field,
            FieldError::InvalidEmailFormat { field, .. } => *field,
        }
    }

    /// Localized text shown to the user next to the field.
    pub fn message<'a>(&self, messages: &'a Messages) -> &'a str {
        match self {
            FieldError::RequiredFieldMissing { .. } => &messages.required,
            FieldError::InvalidEmailFormat { .. } => &messages.invalid_email,
        }
    }

    pub fn is_required_missing(&self) -> bool {
        matches!(self, FieldError::RequiredFieldMissing { .. })
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::RequiredFieldMissing { field } => {
                write!(f, "'{}': required field is empty", field)
            }
            FieldError::InvalidEmailFormat { field, value } => {
                write!(f, "'{}': \"{}\" is not a valid email", field, value)
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// A non-empty collection of field errors.
///
/// Uses `NonEmptyVec` so that a failed validation always carries at least
/// one error.
#[derive(Debug, Clone)]
pub struct FieldErrors(pub NonEmptyVec<FieldError>);

impl FieldErrors {
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Try to create from a vec, returning None if empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Errors that belong to one field.
    pub fn for_field(&self, field: FieldName) -> impl Iterator<Item = &FieldError> {
        self.iter().filter(move |e| e.field() == field)
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        Self(self.0.combine(other.0))
    }
}

impl From<FieldError> for FieldErrors {
    fn from(error: FieldError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Form errors ({}):", self.len())?;
        for error in self.iter() {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

/// Validation result type used by the form validators.
pub type FormValidation<T> = Validation<T, FieldErrors>;

/// Extension trait for creating failing validations easily.
pub trait FormValidationExt<T> {
    fn fail_with(error: FieldError) -> FormValidation<T>;
}

impl<T> FormValidationExt<T> for FormValidation<T> {
    fn fail_with(error: FieldError) -> FormValidation<T> {
        Validation::Failure(FieldErrors::single(error))
    }
}

/// Field name to human-readable message. A missing key means the field is valid.
///
/// Keys are [`FieldName`]s, so every entry corresponds to a real form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorSet {
    errors: BTreeMap<FieldName, String>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Localize accumulated field errors.
    ///
    /// If a field collected more than one error the last one wins; the
    /// validators never produce two for the same field.
    pub fn from_errors(errors: &FieldErrors, messages: &Messages) -> Self {
        let mut set = Self::new();
        for error in errors.iter() {
            set.insert(error.field(), error.message(messages));
        }
        set
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FieldName) -> Option<String> {
        self.errors.remove(&field)
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    /// Fields that currently carry an error, in page order.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl FromIterator<(FieldName, String)> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// Errors raised while loading [`SiteSettings`](crate::settings::SiteSettings).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{path}: could not read settings file: {message}")]
    Io { path: String, message: String },

    #[error("{source_name}: parse error: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("env:{var}: expected {expected}, got \"{value}\"")]
    InvalidEnv {
        var: String,
        expected: &'static str,
        value: String,
    },

    #[error("'{path}': {message}")]
    Invalid { path: String, message: String },
}

impl SettingsError {
    pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        SettingsError::Invalid {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A non-empty collection of settings errors, reported together.
#[derive(Debug, Clone)]
pub struct SettingsErrors(pub NonEmptyVec<SettingsError>);

impl SettingsErrors {
    pub fn single(error: SettingsError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    pub fn from_vec(errors: Vec<SettingsError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    pub fn first(&self) -> &SettingsError {
        self.0.head()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingsError> {
        self.0.iter()
    }
}

impl Semigroup for SettingsErrors {
    fn combine(self, other: Self) -> Self {
        Self(self.0.combine(other.0))
    }
}

impl From<SettingsError> for SettingsErrors {
    fn from(error: SettingsError) -> Self {
        Self::single(error)
    }
}

impl fmt::Display for SettingsErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Settings errors ({}):", self.len())?;
        for error in self.iter() {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SettingsErrors {}

pub type SettingsValidation<T> = Validation<T, SettingsErrors>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_field() {
        let err = FieldError::RequiredFieldMissing {
            field: FieldName::Nome,
        };
        assert_eq!(err.field(), FieldName::Nome);
        assert!(err.is_required_missing());

        let err = FieldError::InvalidEmailFormat {
            field: FieldName::Email,
            value: "x".to_string(),
        };
        assert_eq!(err.field(), FieldName::Email);
        assert!(!err.is_required_missing());
    }

    #[test]
    fn test_field_errors_combine() {
        let e1 = FieldErrors::single(FieldError::RequiredFieldMissing {
            field: FieldName::Nome,
        });
        let e2 = FieldErrors::single(FieldError::RequiredFieldMissing {
            field: FieldName::Servico,
        });
        let combined = e1.combine(e2);
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.first().field(), FieldName::Nome);
    }

    #[test]
    fn test_form_validation_fail_with() {
        let result: FormValidation<()> =
            FormValidation::fail_with(FieldError::RequiredFieldMissing {
                field: FieldName::Email,
            });
        assert!(result.is_failure());
    }

    #[test]
    fn test_error_set_from_errors_localizes() {
        let messages = Messages::default();
        let errors = FieldErrors::from_vec(vec![
            FieldError::RequiredFieldMissing {
                field: FieldName::Empresa,
            },
            FieldError::InvalidEmailFormat {
                field: FieldName::Email,
                value: "nope".to_string(),
            },
        ])
        .unwrap();

        let set = ErrorSet::from_errors(&errors, &messages);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(FieldName::Empresa), Some(messages.required.as_str()));
        assert_eq!(
            set.get(FieldName::Email),
            Some(messages.invalid_email.as_str())
        );
        assert_eq!(
            set.fields().collect::<Vec<_>>(),
            vec![FieldName::Empresa, FieldName::Email]
        );
    }

    #[test]
    fn test_settings_errors_display() {
        let errors = SettingsErrors::from_vec(vec![
            SettingsError::invalid("recipient", "must be a valid email"),
            SettingsError::InvalidEnv {
                var: "OLOKUN_SUBMIT_DELAY_MS".to_string(),
                expected: "integer",
                value: "soon".to_string(),
            },
        ])
        .unwrap();

        let text = errors.to_string();
        assert!(text.starts_with("Settings errors (2):"));
        assert!(text.contains("'recipient': must be a valid email"));
        assert!(text.contains("env:OLOKUN_SUBMIT_DELAY_MS: expected integer, got \"soon\""));
    }
}
