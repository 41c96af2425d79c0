use std::future::Future;

use feedback_models::{
    form::FeedbackFormValues,
    page::{FeedbackPage, QueryValue},
    submission::{SubmissionState, SubmissionTransitionError},
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FormFeatureService: Send + Sync + 'static {
    /// Derive the page shell from the `product` query parameter.
    fn get_page(&self, product: Option<QueryValue>) -> FeedbackPage;

    /// Check the form constraints and hand the values to the form backend.
    ///
    /// Backend failures are not errors here, they are reported through the
    /// returned state.
    fn submit(
        &self,
        values: FeedbackFormValues,
    ) -> impl Future<Output = Result<SubmissionState, FormSubmitError>> + Send;

    /// Render the page for the given submission state. `values` are filled
    /// back into the form.
    fn render_page(
        &self,
        page: &FeedbackPage,
        state: &SubmissionState,
        values: &FeedbackFormValues,
    ) -> anyhow::Result<String>;
}

#[derive(Debug, Error)]
pub enum FormSubmitError {
    #[error(transparent)]
    Transition(#[from] SubmissionTransitionError),
}

#[cfg(feature = "mock")]
impl MockFormFeatureService {
    pub fn with_get_page(mut self, product: Option<QueryValue>, result: FeedbackPage) -> Self {
        self.expect_get_page()
            .once()
            .with(mockall::predicate::eq(product))
            .return_once(|_| result);
        self
    }

    pub fn with_submit(
        mut self,
        values: FeedbackFormValues,
        result: Result<SubmissionState, FormSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(values))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
