//! Inline field feedback.
//!
//! [`FieldFeedback`] holds the errors currently shown next to form fields.
//! It changes in three ways: a whole-form replacement on submit, a
//! single-field check on blur, and clearing one field as soon as the user
//! edits it. [`FieldFeedback::render`] projects it onto a [`View`].

use crate::error::ErrorSet;
use crate::field::FieldName;
use crate::settings::Messages;
use crate::validate::validate_single_field;
use crate::view::View;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFeedback {
    errors: ErrorSet,
}

impl FieldFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every shown error with `errors`.
    ///
    /// Fields absent from `errors` lose their indicator, so nothing stale
    /// survives from an earlier submit.
    pub fn apply_errors(&mut self, errors: ErrorSet) {
        self.errors = errors;
    }

    /// Drop the error of one field, leaving the others untouched.
    pub fn clear_field(&mut self, field: FieldName) {
        self.errors.remove(field);
    }

    /// Re-check one field and show or clear its error.
    ///
    /// The value is trimmed first, so a padded address is accepted on blur
    /// and only rejected on submit. Returns the message now shown for the
    /// field, if any.
    pub fn validate_single_field(
        &mut self,
        field: FieldName,
        value: &str,
        messages: &Messages,
    ) -> Option<&str> {
        match validate_single_field(field, value.trim()) {
            Some(error) => {
                self.errors.insert(field, error.message(messages));
                self.errors.get(field)
            }
            None => {
                self.errors.remove(field);
                None
            }
        }
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// Show exactly the current errors: every field is either marked with
    /// its single message or cleared.
    pub fn render<V: View + ?Sized>(&self, view: &mut V) {
        for field in FieldName::ALL {
            match self.errors.get(field) {
                Some(message) => view.show_field_error(field, message),
                None => view.clear_field_error(field),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MockView;

    fn errors(fields: &[FieldName]) -> ErrorSet {
        fields
            .iter()
            .map(|f| (*f, format!("{} is wrong", f)))
            .collect()
    }

    #[test]
    fn test_apply_errors_leaves_no_stale_indicators() {
        let mut view = MockView::with_contact_form("Enviar");
        let mut feedback = FieldFeedback::new();

        feedback.apply_errors(errors(&[FieldName::Nome, FieldName::Email]));
        feedback.render(&mut view);
        assert_eq!(
            view.fields_with_errors(),
            vec![FieldName::Nome, FieldName::Email]
        );

        feedback.apply_errors(errors(&[FieldName::Servico]));
        feedback.render(&mut view);
        assert_eq!(view.fields_with_errors(), vec![FieldName::Servico]);
        assert_eq!(view.field_error(FieldName::Servico), Some("servico is wrong"));
    }

    #[test]
    fn test_clear_field_keeps_other_fields() {
        let mut feedback = FieldFeedback::new();
        feedback.apply_errors(errors(&[FieldName::Nome, FieldName::Empresa]));

        feedback.clear_field(FieldName::Nome);
        assert!(!feedback.errors().contains(FieldName::Nome));
        assert!(feedback.errors().contains(FieldName::Empresa));
    }

    #[test]
    fn test_validate_single_field_shows_and_clears() {
        let messages = Messages::default();
        let mut feedback = FieldFeedback::new();

        assert_eq!(
            feedback.validate_single_field(FieldName::Email, "ana@", &messages),
            Some(messages.invalid_email.as_str())
        );
        assert_eq!(
            feedback.validate_single_field(FieldName::Email, "", &messages),
            Some(messages.required.as_str())
        );
        assert_eq!(
            feedback.validate_single_field(FieldName::Email, "ana@mare.com", &messages),
            None
        );
        assert!(feedback.errors().is_empty());
    }

    #[test]
    fn test_blur_trims_before_checking() {
        let messages = Messages::default();
        let mut feedback = FieldFeedback::new();

        assert_eq!(
            feedback.validate_single_field(FieldName::Email, "  ana@mare.com\t", &messages),
            None
        );
        assert_eq!(
            feedback.validate_single_field(FieldName::Nome, "   ", &messages),
            Some(messages.required.as_str())
        );
    }

    #[test]
    fn test_optional_field_blur_never_errors() {
        let messages = Messages::default();
        let mut feedback = FieldFeedback::new();
        assert_eq!(
            feedback.validate_single_field(FieldName::Telefone, "", &messages),
            None
        );
    }
}
