use serde::Serialize;
use thiserror::Error;

use crate::form::FieldErrors;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Lifecycle of a single form submission attempt.
///
/// The status only moves forward: `Idle -> Submitting -> {Succeeded, Failed}`.
/// A failed submission may be submitted again, which re-enters `Submitting`
/// and clears the previous validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    status: SubmissionStatus,
    errors: FieldErrors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot move submission from {from:?} to {to:?}.")]
pub struct SubmissionTransitionError {
    pub from: SubmissionStatus,
    pub to: SubmissionStatus,
}

impl SubmissionState {
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == SubmissionStatus::Succeeded
    }

    pub fn is_failed(&self) -> bool {
        self.status == SubmissionStatus::Failed
    }

    /// Whether the submission failed for a reason other than invalid fields,
    /// i.e. the backend could not be reached or did not accept the request.
    pub fn is_backend_failure(&self) -> bool {
        self.is_failed() && self.errors.is_empty()
    }

    pub fn begin(&mut self) -> Result<(), SubmissionTransitionError> {
        self.transition(SubmissionStatus::Submitting, |from| {
            matches!(from, SubmissionStatus::Idle | SubmissionStatus::Failed)
        })?;
        self.errors = FieldErrors::default();
        Ok(())
    }

    pub fn succeed(&mut self) -> Result<(), SubmissionTransitionError> {
        self.transition(SubmissionStatus::Succeeded, |from| {
            from == SubmissionStatus::Submitting
        })
    }

    pub fn fail(&mut self, errors: FieldErrors) -> Result<(), SubmissionTransitionError> {
        self.transition(SubmissionStatus::Failed, |from| {
            from == SubmissionStatus::Submitting
        })?;
        self.errors = errors;
        Ok(())
    }

    fn transition(
        &mut self,
        to: SubmissionStatus,
        allowed: impl FnOnce(SubmissionStatus) -> bool,
    ) -> Result<(), SubmissionTransitionError> {
        if !allowed(self.status) {
            return Err(SubmissionTransitionError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
