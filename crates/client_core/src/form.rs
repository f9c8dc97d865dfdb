//! Search form state machine shared by the desktop and terminal front-ends.
//!
//! `Idle -> Loading -> {Success, Error}`. Only one request may be in flight;
//! completions for any other request id are dropped. With auto-clear enabled a
//! success message falls back to `Idle` once its display window has elapsed,
//! checked through [`FormController::tick`].

use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use shared::{
    domain::{ExamFilter, SearchOption},
    protocol::{RunScriptResponse, ScriptOutcome, SearchRequest},
};
use tracing::{debug, warn};

pub const SUCCESS_MESSAGE: &str = "✅ Papers downloaded to your Downloads/ThaparPapers folder";
pub const NO_RESULTS_MESSAGE: &str = "❌ No papers found for the given search criteria";
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "❌ An error occurred while processing your request";

pub const SUCCESS_DISPLAY_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Snapshot of the form taken when a submit is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmit {
    pub request_id: RequestId,
    pub request: SearchRequest,
}

#[derive(Debug, Clone)]
pub struct FormController {
    pub option: SearchOption,
    pub value: String,
    pub exam_filter: ExamFilter,
    pub merge_pdfs: bool,
    phase: FormPhase,
    in_flight: Option<RequestId>,
    next_request_id: u64,
    success_auto_clear: Option<Duration>,
    success_deadline: Option<Instant>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    /// Single output text, success stays until the next submit.
    pub fn new() -> Self {
        Self {
            option: SearchOption::default(),
            value: String::new(),
            exam_filter: ExamFilter::default(),
            merge_pdfs: false,
            phase: FormPhase::Idle,
            in_flight: None,
            next_request_id: 1,
            success_auto_clear: None,
            success_deadline: None,
        }
    }

    /// Success message is cleared [`SUCCESS_DISPLAY_DURATION`] after it appears.
    pub fn with_success_auto_clear() -> Self {
        Self {
            success_auto_clear: Some(SUCCESS_DISPLAY_DURATION),
            ..Self::new()
        }
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Text to show under the form, if any.
    pub fn message(&self) -> Option<&str> {
        match &self.phase {
            FormPhase::Success(message) | FormPhase::Error(message) => Some(message),
            FormPhase::Idle | FormPhase::Loading => None,
        }
    }

    pub fn current_request(&self) -> SearchRequest {
        SearchRequest {
            option: self.option,
            value: self.value.clone(),
            merge_pdfs: self.merge_pdfs,
            exam_filter: self.exam_filter,
        }
    }

    /// Returns `None` while an earlier submit is still pending.
    pub fn begin_submit(&mut self) -> Option<PendingSubmit> {
        if let Some(request_id) = self.in_flight {
            debug!(request_id = request_id.0, "submit ignored; request already in flight");
            return None;
        }

        let request_id = RequestId(self.next_request_id);
        self.next_request_id += 1;
        self.in_flight = Some(request_id);
        self.phase = FormPhase::Loading;
        self.success_deadline = None;

        Some(PendingSubmit {
            request_id,
            request: self.current_request(),
        })
    }

    /// Applies the result of `request_id`. Returns `false` if it was stale.
    pub fn complete<E: Display>(
        &mut self,
        request_id: RequestId,
        result: Result<RunScriptResponse, E>,
        now: Instant,
    ) -> bool {
        if self.in_flight != Some(request_id) {
            debug!(request_id = request_id.0, "dropping stale run-script result");
            return false;
        }
        self.in_flight = None;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(request_id = request_id.0, error = %err, "run-script request failed");
                self.phase = FormPhase::Error(TRANSPORT_FAILURE_MESSAGE.to_string());
                return true;
            }
        };

        self.phase = match response.outcome() {
            ScriptOutcome::Success { summary } => {
                debug!(request_id = request_id.0, %summary, "papers downloaded");
                self.success_deadline = self.success_auto_clear.map(|window| now + window);
                FormPhase::Success(SUCCESS_MESSAGE.to_string())
            }
            ScriptOutcome::NoResults => FormPhase::Error(NO_RESULTS_MESSAGE.to_string()),
            ScriptOutcome::Failed {
                message: Some(message),
            } => FormPhase::Error(message),
            ScriptOutcome::Failed { message: None } => {
                FormPhase::Error(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };
        true
    }

    /// Expires the success message. Returns `true` if the phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.success_deadline {
            Some(deadline) if now >= deadline => {
                self.success_deadline = None;
                if matches!(self.phase, FormPhase::Success(_)) {
                    self.phase = FormPhase::Idle;
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Time left before the success message clears, for repaint scheduling.
    pub fn until_auto_clear(&self, now: Instant) -> Option<Duration> {
        self.success_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
