use feedback_extern_contracts::form_backend::{FormBackendApiService, FormBackendResponse};
use feedback_models::form::FeedbackSubmission;

use crate::{netlify::NetlifyFormsApiServiceImpl, statickit::StaticKitApiServiceImpl};

pub mod http;
pub mod netlify;
pub mod statickit;

/// The form backend selected by configuration.
#[derive(Debug, Clone)]
pub enum FormBackendApiServiceImpl {
    StaticKit(StaticKitApiServiceImpl),
    Netlify(NetlifyFormsApiServiceImpl),
}

impl FormBackendApiServiceImpl {
    /// Whether the rendered form needs a hidden honeypot input.
    pub fn uses_honeypot(&self) -> bool {
        matches!(self, Self::Netlify(_))
    }
}

impl FormBackendApiService for FormBackendApiServiceImpl {
    async fn submit(&self, submission: FeedbackSubmission) -> anyhow::Result<FormBackendResponse> {
        match self {
            Self::StaticKit(statickit) => statickit.submit(submission).await,
            Self::Netlify(netlify) => netlify.submit(submission).await,
        }
    }
}
