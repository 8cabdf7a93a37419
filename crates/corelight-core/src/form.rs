//! Contact form submission lifecycle
//!
//! `begin` locks the submit control and hands back the request to send;
//! `finish` consumes whatever happened on the wire and updates the form.
//! Nothing is retried automatically.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::FormConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in flight")]
    AlreadySubmitting,
    #[error("No submission in flight")]
    NotSubmitting,
}

/// Where the current submission attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// What came back from the form service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Service answered with a 2xx status
    Accepted { status: u16 },
    /// Service answered with any other status
    Rejected { status: u16 },
    /// The request never completed
    Unreachable { reason: String },
}

impl SubmitOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            SubmitOutcome::Accepted { status }
        } else {
            SubmitOutcome::Rejected { status }
        }
    }
}

/// Request the transport layer should send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub endpoint: String,
    /// Value of the `Accept` header
    pub accept: &'static str,
}

/// The form's visible controls
pub trait FormView {
    fn submit_label(&self) -> String;
    fn set_submit_label(&mut self, label: &str);
    fn set_submit_enabled(&mut self, enabled: bool);
    /// Hide the form container
    fn hide_form(&mut self);
    /// Reveal the success message
    fn show_success(&mut self);
    /// Clear every field back to its default
    fn reset_fields(&mut self);
    /// Surface an error the user has to acknowledge
    fn notify_error(&mut self, message: &str);
}

pub struct FormSubmitter {
    config: FormConfig,
    state: SubmissionState,
    original_label: Option<String>,
}

impl FormSubmitter {
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            state: SubmissionState::Idle,
            original_label: None,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Lock the form and produce the request to send
    pub fn begin(&mut self, view: &mut impl FormView) -> Result<SubmitRequest, SubmitError> {
        if self.state == SubmissionState::Submitting {
            return Err(SubmitError::AlreadySubmitting);
        }

        self.original_label = Some(view.submit_label());
        view.set_submit_label(&self.config.transmitting_label);
        view.set_submit_enabled(false);
        self.state = SubmissionState::Submitting;

        let endpoint = self.config.endpoint();
        info!(endpoint = %endpoint, "Submitting contact form");
        Ok(SubmitRequest {
            endpoint,
            accept: "application/json",
        })
    }

    /// Reflect the outcome of the in-flight submission in the form
    pub fn finish(
        &mut self,
        view: &mut impl FormView,
        outcome: SubmitOutcome,
    ) -> Result<SubmissionState, SubmitError> {
        if self.state != SubmissionState::Submitting {
            return Err(SubmitError::NotSubmitting);
        }

        self.state = match outcome {
            SubmitOutcome::Accepted { status } => {
                info!(status, "Contact form accepted");
                view.hide_form();
                view.show_success();
                view.reset_fields();
                self.original_label = None;
                SubmissionState::Succeeded
            }
            SubmitOutcome::Rejected { status } => {
                warn!(status, "Contact form rejected");
                view.notify_error(&self.config.rejected_message);
                self.unlock(view);
                SubmissionState::Failed
            }
            SubmitOutcome::Unreachable { reason } => {
                warn!(%reason, "Contact form endpoint unreachable");
                view.notify_error(&format!("{}{}", self.config.unreachable_prefix, reason));
                self.unlock(view);
                SubmissionState::Failed
            }
        };
        Ok(self.state)
    }

    fn unlock(&mut self, view: &mut impl FormView) {
        if let Some(label) = self.original_label.take() {
            view.set_submit_label(&label);
        }
        view.set_submit_enabled(true);
    }
}
