use std::future::Future;

use feedback_models::form::{FeedbackSubmission, FieldErrors};

/// A hosted forms service that receives feedback submissions.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FormBackendApiService: Send + Sync + 'static {
    /// Send the submission to the backend.
    ///
    /// Transport errors and unreadable responses are returned as `Err`, a
    /// response that the backend answered with is always `Ok`.
    fn submit(
        &self,
        submission: FeedbackSubmission,
    ) -> impl Future<Output = anyhow::Result<FormBackendResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormBackendResponse {
    /// The submission was stored.
    Accepted,
    /// The backend rejected some of the submitted fields.
    Rejected(FieldErrors),
    /// The backend answered with an unexpected status code.
    Failed { status: u16 },
}

#[cfg(feature = "mock")]
impl MockFormBackendApiService {
    pub fn with_submit(
        mut self,
        submission: FeedbackSubmission,
        result: anyhow::Result<FormBackendResponse>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
