//! Olokun site: the client-side behavior of the Olokun marketing site.
//!
//! The crate holds the contact form (validation, inline field feedback and
//! a mail-client hand-off), transient notifications, and the decorative
//! page effects: navigation state, parallax, reading progress, reveal on
//! scroll, the hero typing effect, particles, counters, smooth scrolling
//! and card interactions.
//!
//! # Core Concepts
//!
//! - **Error Accumulation**: every invalid field is reported at once, never
//!   just the first one
//! - **Single State Object**: all UI state lives in one `PageState`, changed
//!   only by `PageState::handle`
//! - **Projection Rendering**: the DOM is a pure projection of that state
//!   through the `View` trait
//! - **Testable Time**: timers are deferred events, so the whole page runs on
//!   a virtual clock in tests
//!
//! # Quick Start
//!
//! ```
//! use olokun_site::{validate, FieldName, FormSnapshot, Messages};
//!
//! let snapshot = FormSnapshot::from_pairs([
//!     ("nome", "Ana"),
//!     ("empresa", "Maré Azul"),
//!     ("email", "ana@exemplo"),
//!     ("servico", "Licenciamento"),
//! ]);
//!
//! let errors = validate(&snapshot, &Messages::default());
//! assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FieldName::Email]);
//! ```
//!
//! Driving a whole page on a virtual clock:
//!
//! ```
//! use std::time::Duration;
//! use olokun_site::prelude::*;
//!
//! let mut view = MockView::with_contact_form("Enviar");
//! view.type_into(FieldName::Nome, "Ana");
//! view.type_into(FieldName::Empresa, "Maré Azul");
//! view.type_into(FieldName::Email, "ana@mareazul.com.br");
//! view.type_into(FieldName::Servico, "Licenciamento");
//!
//! let mut event_loop = EventLoop::new(Page::new(view, SiteSettings::default()));
//! event_loop.submit();
//! assert!(event_loop.view().submit.as_ref().unwrap().is_busy());
//!
//! event_loop.advance(Duration::from_millis(1500));
//! assert_eq!(event_loop.view().opened_urls.len(), 1);
//! assert_eq!(event_loop.view().field_value(FieldName::Nome), Some(""));
//! ```
//!
//! # Architecture
//!
//! The crate follows the "pure core, imperative shell" pattern:
//!
//! - **Pure Core**: validation, the submission state machine, notification
//!   lifecycle and every effect's arithmetic are plain functions and values
//! - **Imperative Shell**: DOM access goes through the `View` trait, and
//!   settings I/O through the `SettingsEnv` trait
//!
//! # Module Structure
//!
//! - [`prelude`]: Convenient re-exports for common usage
//! - [`field`], [`snapshot`]: form field names and submitted values
//! - [`error`]: `FieldError`, `ErrorSet` and settings errors
//! - [`validate`]: the validator
//! - [`feedback`], [`submission`], [`mailto`]: the contact form flow
//! - [`notification`]: self-dismissing notifications
//! - [`nav`], [`scroll`], [`typing`], [`particles`], [`counter`], [`cards`]:
//!   decorative effects
//! - [`settings`], [`mod@env`]: layered settings loading
//! - [`page`], [`runtime`]: the page controller and a virtual-clock loop
//! - [`view`]: the `View` contract and `MockView`
//! - `web`: the browser shell (feature `wasm`, `wasm32` only)

pub mod cards;
pub mod counter;
pub mod env;
pub mod error;
pub mod feedback;
pub mod field;
pub mod mailto;
pub mod nav;
pub mod notification;
pub mod page;
pub mod particles;
pub mod prelude;
pub mod runtime;
pub mod scroll;
pub mod settings;
pub mod snapshot;
pub mod submission;
pub mod typing;
pub mod validate;
pub mod view;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;

// Re-exports for convenience
pub use env::{MockEnv, RealEnv, SettingsEnv};
pub use error::{
    ErrorSet, FieldError, FieldErrors, FormValidation, FormValidationExt, SettingsError,
    SettingsErrors, SettingsValidation,
};
pub use feedback::FieldFeedback;
pub use field::{FieldName, UnknownField};
pub use mailto::{encode_component, MailtoLink};
pub use notification::{
    NotificationId, NotificationKind, NotificationPhase, NotificationRecord, Notifications,
};
pub use page::{render, Effect, Event, Page, PageState};
pub use runtime::EventLoop;
pub use settings::{Messages, SiteSettings};
pub use snapshot::FormSnapshot;
pub use submission::{SubmissionFlow, SubmitOutcome, SubmitPhase};
pub use validate::validators;
pub use validate::{
    is_valid_email, validate, validate_field, validate_single_field, Validate, Validator,
};
pub use view::{MockView, SubmitControl, View};

// Re-export stillwater types that are commonly used
pub use stillwater::{NonEmptyVec, Semigroup, Validation};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        let _: FormValidation<()> = Validation::Success(());
        assert!(is_valid_email("a@b.co"));
    }
}
