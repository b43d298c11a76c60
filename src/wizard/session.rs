//! One wizard session: form values, current step, last result.
//!
//! All mutation goes through the methods here. Submission is split into
//! `begin_submit` / `complete_submit` so the TUI can run the HTTP call on a
//! worker thread; `submit` composes both for synchronous callers.

use thiserror::Error;

use crate::assessment::{AssessmentView, derive};
use crate::data::{Predictor, RequestError};
use crate::domain::{FormError, FormState, PredictionResult, RequestPayload, WizardStep, normalize};

use super::step::StepController;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a prediction request is already in flight")]
    SubmitInFlight,
}

/// Handed out by `begin_submit`; identifies which session state a response
/// belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub payload: RequestPayload,
    /// Form as it was when the payload was built; the scorecard reads this.
    pub form: FormState,
}

/// What `complete_submit` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed,
    /// The session was reset after the request went out.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    form: FormState,
    steps: StepController,
    result: Option<PredictionResult>,
    /// Body that produced `result`; edits made afterwards do not touch it.
    sent: Option<RequestPayload>,
    assessment: Option<AssessmentView>,
    error: Option<String>,
    in_flight: bool,
    generation: u64,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn step(&self) -> WizardStep {
        self.steps.current()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn sent_payload(&self) -> Option<&RequestPayload> {
        self.sent.as_ref()
    }

    pub fn assessment(&self) -> Option<&AssessmentView> {
        self.assessment.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn set_field(&mut self, key: &str, raw: impl Into<String>) -> Result<(), FormError> {
        self.form.set_field(key, raw)
    }

    pub fn next(&mut self) -> WizardStep {
        self.steps.next()
    }

    pub fn prev(&mut self) -> WizardStep {
        self.steps.prev()
    }

    /// Back to an empty form on step 1. Any outstanding request becomes stale.
    pub fn reset(&mut self) {
        self.form.reset();
        self.steps.reset();
        self.result = None;
        self.sent = None;
        self.assessment = None;
        self.error = None;
        self.in_flight = false;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "session reset");
    }

    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SessionError> {
        if self.in_flight {
            return Err(SessionError::SubmitInFlight);
        }
        self.in_flight = true;
        self.error = None;
        self.result = None;
        self.sent = None;
        self.assessment = None;

        let payload = normalize(&self.form);
        let raw = payload.raw_keys();
        if !raw.is_empty() {
            tracing::warn!(fields = ?raw, "non-numeric values forwarded as raw strings");
        }
        tracing::info!(fields = payload.len(), "submitting prediction request");

        Ok(SubmitTicket {
            generation: self.generation,
            payload,
            form: self.form.clone(),
        })
    }

    pub fn complete_submit(
        &mut self,
        ticket: &SubmitTicket,
        outcome: Result<PredictionResult, RequestError>,
    ) -> SubmitOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale prediction response"
            );
            return SubmitOutcome::Stale;
        }
        self.in_flight = false;

        match outcome {
            Ok(result) => {
                self.assessment = Some(derive(&result, &ticket.form));
                self.result = Some(result);
                self.sent = Some(ticket.payload.clone());
                self.steps.submit_succeeded();
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                self.error = Some(err.message);
                SubmitOutcome::Failed
            }
        }
    }

    /// Submit and wait for the response on the current thread.
    pub fn submit(&mut self, predictor: &impl Predictor) -> Result<SubmitOutcome, SessionError> {
        let ticket = self.begin_submit()?;
        let outcome = predictor.predict(&ticket.payload);
        Ok(self.complete_submit(&ticket, outcome))
    }
}
