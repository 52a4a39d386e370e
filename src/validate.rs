//! Contact form validation.
//!
//! Each field is checked independently and every failure is accumulated, so
//! one pass reports all problems in the form. Validation is pure: rendering
//! the result is the job of [`feedback`](crate::feedback).
//!
//! Rules:
//! - `nome`, `empresa`, `email` and `servico` are required (trimmed value non-empty).
//! - `email`, when filled in, must look like `local@domain.tld`, with no
//!   surrounding whitespace.
//! - `telefone` and `mensagem` are never validated.
//!
//! # Example
//!
//! ```
//! use olokun_site::{validate, FieldName, FormSnapshot, Messages};
//!
//! let snapshot = FormSnapshot::empty()
//!     .with(FieldName::Nome, "A")
//!     .with(FieldName::Empresa, "B")
//!     .with(FieldName::Email, "not-an-email")
//!     .with(FieldName::Servico, "C");
//!
//! let errors = validate(&snapshot, &Messages::default());
//! assert_eq!(errors.len(), 1);
//! assert!(errors.contains(FieldName::Email));
//! ```

use std::sync::OnceLock;

use regex::Regex;
use stillwater::Validation;

use crate::error::{ErrorSet, FieldError, FieldErrors, FormValidation};
use crate::field::FieldName;
use crate::settings::Messages;
use crate::snapshot::FormSnapshot;

/// Trait for types that can be validated as a whole.
pub trait Validate {
    /// Returns `Success(())` or every accumulated field error.
    fn validate(&self) -> FormValidation<()>;
}

/// A single rule applied to one field value.
pub trait Validator {
    fn validate(&self, value: &str, field: FieldName) -> FormValidation<()>;
}

pub mod validators {
    //! Built-in field rules.

    use super::*;

    /// Fails when the trimmed value is empty.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Required;

    impl Validator for Required {
        fn validate(&self, value: &str, field: FieldName) -> FormValidation<()> {
            if value.trim().is_empty() {
                Validation::Failure(FieldErrors::single(FieldError::RequiredFieldMissing {
                    field,
                }))
            } else {
                Validation::Success(())
            }
        }
    }

    /// Fails when a non-blank value does not look like an email address.
    ///
    /// Blank values pass; pair with [`Required`] to reject them. The pattern
    /// is matched against the value as given, so surrounding whitespace
    /// fails.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct EmailFormat;

    impl Validator for EmailFormat {
        fn validate(&self, value: &str, field: FieldName) -> FormValidation<()> {
            if value.trim().is_empty() || is_valid_email(value) {
                Validation::Success(())
            } else {
                Validation::Failure(FieldErrors::single(FieldError::InvalidEmailFormat {
                    field,
                    value: value.to_string(),
                }))
            }
        }
    }
}

use validators::{EmailFormat, Required};

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Check the simple `local@domain.tld` shape.
///
/// Whitespace and extra `@` signs are rejected anywhere in the value.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Run every rule that applies to one field.
///
/// This is the same rule set used for the whole form, scoped to a single
/// field, which lets blur handlers validate incrementally.
pub fn validate_field(field: FieldName, value: &str) -> FormValidation<()> {
    let mut checks = Vec::with_capacity(2);
    if field.is_required() {
        checks.push(Required.validate(value, field));
    }
    if field == FieldName::Email {
        checks.push(EmailFormat.validate(value, field));
    }
    if checks.is_empty() {
        return Validation::Success(());
    }

    Validation::all_vec(checks).map(|_| ())
}

/// The first error of a single field, if any.
pub fn validate_single_field(field: FieldName, value: &str) -> Option<FieldError> {
    match validate_field(field, value) {
        Validation::Success(()) => None,
        Validation::Failure(errors) => Some(errors.first().clone()),
    }
}

impl Validate for FormSnapshot {
    fn validate(&self) -> FormValidation<()> {
        let checks: Vec<FormValidation<()>> = FieldName::ALL
            .into_iter()
            .map(|field| validate_field(field, self.get(field).unwrap_or("")))
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Validate a snapshot and localize the result.
///
/// The returned set is empty iff the submission is acceptable.
pub fn validate(snapshot: &FormSnapshot, messages: &Messages) -> ErrorSet {
    match snapshot.validate() {
        Validation::Success(()) => ErrorSet::new(),
        Validation::Failure(errors) => ErrorSet::from_errors(&errors, messages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> FormSnapshot {
        FormSnapshot::empty()
            .with(FieldName::Nome, "Ana")
            .with(FieldName::Empresa, "Maré Ltda")
            .with(FieldName::Email, "ana@mare.com.br")
            .with(FieldName::Servico, "consultoria")
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_required_validator() {
        assert!(Required.validate("x", FieldName::Nome).is_success());
        assert!(Required.validate("   ", FieldName::Nome).is_failure());
        assert!(Required.validate("", FieldName::Nome).is_failure());
    }

    #[test]
    fn test_email_validator_ignores_empty() {
        assert!(EmailFormat.validate("", FieldName::Email).is_success());
        assert!(EmailFormat.validate("  ", FieldName::Email).is_success());
        assert!(EmailFormat.validate("x@y.z", FieldName::Email).is_success());
        assert!(EmailFormat.validate("xyz", FieldName::Email).is_failure());
    }

    #[test]
    fn test_padded_email_fails_on_submit() {
        let messages = Messages::default();
        let snapshot = complete().with(FieldName::Email, " ana@mare.com ");
        let errors = validate(&snapshot, &messages);

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FieldName::Email]);
        assert_eq!(
            errors.get(FieldName::Email),
            Some(messages.invalid_email.as_str())
        );
        assert_eq!(
            validate_single_field(FieldName::Email, " ana@mare.com "),
            Some(FieldError::InvalidEmailFormat {
                field: FieldName::Email,
                value: " ana@mare.com ".to_string(),
            })
        );
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(validate(&complete(), &Messages::default()).is_empty());
    }

    #[test]
    fn test_optional_fields_never_validated() {
        let snapshot = complete()
            .with(FieldName::Telefone, "not a phone")
            .with(FieldName::Mensagem, "");
        assert!(validate(&snapshot, &Messages::default()).is_empty());
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let messages = Messages::default();
        let errors = validate(&FormSnapshot::empty(), &messages);

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            FieldName::REQUIRED.to_vec()
        );
        for (_, message) in errors.iter() {
            assert_eq!(message, messages.required);
        }
    }

    #[test]
    fn test_empty_email_only_required_error() {
        let messages = Messages::default();
        let snapshot = complete().with(FieldName::Email, "");
        let errors = validate(&snapshot, &messages);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FieldName::Email), Some(messages.required.as_str()));
    }

    #[test]
    fn test_malformed_email_only_format_error() {
        let messages = Messages::default();
        let snapshot = FormSnapshot::empty()
            .with(FieldName::Nome, "A")
            .with(FieldName::Empresa, "B")
            .with(FieldName::Email, "not-an-email")
            .with(FieldName::Servico, "C");
        let errors = validate(&snapshot, &messages);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FieldName::Email),
            Some(messages.invalid_email.as_str())
        );
    }

    #[test]
    fn test_snapshot_validation_accumulates() {
        let snapshot = FormSnapshot::empty()
            .with(FieldName::Email, "bad")
            .with(FieldName::Nome, "A");

        match snapshot.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert_eq!(errors.for_field(FieldName::Email).count(), 1);
            }
            Validation::Success(()) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_validate_single_field() {
        assert_eq!(validate_single_field(FieldName::Telefone, ""), None);
        assert_eq!(validate_single_field(FieldName::Nome, "Ana"), None);
        assert_eq!(
            validate_single_field(FieldName::Nome, " "),
            Some(FieldError::RequiredFieldMissing {
                field: FieldName::Nome
            })
        );
        assert_eq!(
            validate_single_field(FieldName::Email, "ana"),
            Some(FieldError::InvalidEmailFormat {
                field: FieldName::Email,
                value: "ana".to_string(),
            })
        );
    }
}
