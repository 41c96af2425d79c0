use feedback_models::{
    form::{FeedbackFormValues, FieldErrors},
    submission::{SubmissionState, SubmissionStatus},
};
use serde::{Deserialize, Serialize};

/// Body of a feedback submission, either url-encoded from the html form or
/// json. Missing and `null` fields are treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiFeedbackForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub product: Option<String>,
    #[serde(alias = "honeypot", rename = "bot-field")]
    pub honeypot: Option<String>,
}

impl From<ApiFeedbackForm> for FeedbackFormValues {
    fn from(value: ApiFeedbackForm) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            message: value.message.unwrap_or_default(),
            product: value.product.unwrap_or_default(),
            honeypot: value.honeypot,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiSubmissionState {
    pub state: SubmissionStatus,
    pub errors: FieldErrors,
}

impl From<SubmissionState> for ApiSubmissionState {
    fn from(value: SubmissionState) -> Self {
        Self {
            state: value.status(),
            errors: value.errors().clone(),
        }
    }
}
