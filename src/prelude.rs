//! Convenient re-exports for common usage.
//!
//! ```
//! use olokun_site::prelude::*;
//!
//! let errors = validate(&FormSnapshot::empty(), &Messages::default());
//! assert_eq!(errors.len(), FieldName::REQUIRED.len());
//! ```

// ============================================================================
// Stillwater re-exports
// ============================================================================

/// Result type with error accumulation. Field checks are combined with
/// `Validation::all_vec` so every failing field is reported.
pub use stillwater::Validation;

/// Trait for combining values. `FieldErrors` and `SettingsErrors` implement
/// this for error accumulation.
pub use stillwater::Semigroup;

/// Guaranteed non-empty collection. Underlying type for `FieldErrors`.
pub use stillwater::NonEmptyVec;

// ============================================================================
// Form
// ============================================================================

/// The contact form's fields and the required subset.
pub use crate::field::FieldName;

/// Field values taken at submit time.
pub use crate::snapshot::FormSnapshot;

/// A single validation failure.
pub use crate::error::FieldError;

/// Non-empty collection of field errors.
pub use crate::error::FieldErrors;

/// Field name to message map shown next to the form.
pub use crate::error::ErrorSet;

/// Type alias: `Validation<T, FieldErrors>`.
pub use crate::error::FormValidation;

/// Extension trait for creating failing validations easily.
pub use crate::error::FormValidationExt;

/// Validate a whole snapshot into an `ErrorSet`.
pub use crate::validate::validate;

/// Validate a single field, as on blur.
pub use crate::validate::validate_single_field;

/// Trait for types that can be validated.
pub use crate::validate::Validate;

/// Trait for individual validators.
pub use crate::validate::Validator;

/// Built-in validators.
pub mod validators {
    pub use crate::validate::validators::{EmailFormat, Required};
}

/// Inline error indicators.
pub use crate::feedback::FieldFeedback;

/// The submission state machine.
pub use crate::submission::{SubmissionFlow, SubmitOutcome, SubmitPhase};

/// The `mailto:` link handed to the mail client.
pub use crate::mailto::MailtoLink;

// ============================================================================
// Notifications
// ============================================================================

pub use crate::notification::{NotificationId, NotificationKind, NotificationRecord, Notifications};

// ============================================================================
// Page
// ============================================================================

/// Events, effects and the page state machine.
pub use crate::page::{render, Effect, Event, Page, PageState};

/// Virtual-clock driver for a page.
pub use crate::runtime::EventLoop;

/// Layout measurements carried by scroll events.
pub use crate::scroll::{RevealKind, ScrollMetrics};

/// A page section for active-link highlighting.
pub use crate::nav::Section;

/// The DOM contract and its in-memory implementation.
pub use crate::view::{MockView, SubmitControl, View};

// ============================================================================
// Settings
// ============================================================================

pub use crate::settings::{Messages, SiteSettings};

pub use crate::error::{SettingsError, SettingsErrors, SettingsValidation};

/// Trait for abstracting settings I/O.
pub use crate::env::SettingsEnv;

pub use crate::env::{MockEnv, RealEnv};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_validation_types_available() {
        let _: FormValidation<()> = Validation::Success(());
        let _: FormValidation<()> = Validation::Failure(FieldErrors::single(
            FieldError::RequiredFieldMissing {
                field: FieldName::Nome,
            },
        ));
    }

    #[test]
    fn test_prelude_semigroup_combine() {
        let e1 = FieldErrors::single(FieldError::RequiredFieldMissing {
            field: FieldName::Nome,
        });
        let e2 = FieldErrors::single(FieldError::RequiredFieldMissing {
            field: FieldName::Empresa,
        });
        assert_eq!(e1.combine(e2).len(), 2);
    }

    #[test]
    fn test_prelude_validators_module() {
        use validators::EmailFormat;

        assert!(EmailFormat.validate("ana@mare.com", FieldName::Email).is_success());
        assert!(EmailFormat.validate("ana", FieldName::Email).is_failure());
    }

    #[test]
    fn test_prelude_form_validation_ext() {
        let result: FormValidation<()> = FormValidation::fail_with(FieldError::RequiredFieldMissing {
            field: FieldName::Servico,
        });
        assert!(result.is_failure());
    }
}
