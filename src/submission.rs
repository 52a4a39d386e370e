//! Contact form submission flow.
//!
//! ```text
//! Idle --submit--> Validating --errors--> Rejected --> Idle
//!                       |
//!                       +--ok--> Submitting --delay--> Completed --> Idle
//! ```
//!
//! `Validating`, `Rejected` and `Completed` are instantaneous; only `Idle`
//! and `Submitting` persist between events. Entering `Submitting` disables
//! the submit control before the delay starts. Leaving it hands the mail
//! link off and restores the control.

use crate::error::ErrorSet;
use crate::mailto::MailtoLink;
use crate::settings::Messages;
use crate::snapshot::FormSnapshot;
use crate::validate::validate;
use crate::view::SubmitControl;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    /// Waiting for the artificial delay, holding the accepted snapshot.
    Submitting { snapshot: FormSnapshot },
}

/// What happened to a submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the flow stays idle and these errors are shown.
    Rejected(ErrorSet),
    /// Validation passed; the flow is now submitting.
    Accepted,
    /// A submission is already in flight; the event is dropped.
    InFlight,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFlow {
    phase: SubmitPhase,
    /// The submit control's label as found in the page, restored when idle.
    idle_label: Option<String>,
}

impl SubmissionFlow {
    pub fn new(idle_label: Option<String>) -> Self {
        Self {
            phase: SubmitPhase::Idle,
            idle_label,
        }
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmitPhase::Submitting { .. })
    }

    /// Handle a submit event with the values taken at submit time.
    pub fn submit(&mut self, snapshot: FormSnapshot, messages: &Messages) -> SubmitOutcome {
        if self.is_submitting() {
            tracing::debug!("submission already in flight, ignoring submit");
            return SubmitOutcome::InFlight;
        }

        let errors = validate(&snapshot, messages);
        if !errors.is_empty() {
            tracing::debug!(
                fields = ?errors.fields().collect::<Vec<_>>(),
                "submission rejected"
            );
            return SubmitOutcome::Rejected(errors);
        }

        tracing::info!("submission accepted");
        self.phase = SubmitPhase::Submitting { snapshot };
        SubmitOutcome::Accepted
    }

    /// Finish the in-flight submission and return the mail link to open.
    ///
    /// Returns `None` when nothing is in flight.
    pub fn complete(&mut self, recipient: &str, messages: &Messages) -> Option<MailtoLink> {
        match std::mem::take(&mut self.phase) {
            SubmitPhase::Submitting { snapshot } => {
                let link = MailtoLink::from_snapshot(&snapshot, recipient, messages);
                tracing::info!(%recipient, "submission handed to mail client");
                Some(link)
            }
            SubmitPhase::Idle => None,
        }
    }

    /// How the submit control should look in the current phase.
    pub fn control(&self, messages: &Messages) -> Option<SubmitControl> {
        match self.phase {
            SubmitPhase::Submitting { .. } => Some(SubmitControl::Busy {
                label: messages.sending.clone(),
            }),
            SubmitPhase::Idle => self
                .idle_label
                .clone()
                .map(|label| SubmitControl::Idle { label }),
        }
    }
}
