use std::sync::Arc;

use feedback_core_form_contracts::{FormFeatureService, FormSubmitError};
use feedback_extern_contracts::form_backend::{FormBackendApiService, FormBackendResponse};
use feedback_models::{
    email_address::EmailAddress,
    form::{
        FeedbackAuthorName, FeedbackField, FeedbackFormValues, FeedbackMessage,
        FeedbackSubmission, FieldErrors, ProductName, HONEYPOT_FIELD,
    },
    page::{FeedbackPage, QueryValue},
    submission::SubmissionState,
};
use feedback_templates_contracts::{
    FeedbackPageErrors, FeedbackPageTemplate, FeedbackPageValues, TemplateService,
};
use tracing::{debug, error, info};

#[cfg(test)]
mod tests;

const REQUIRED: &str = "is required";
const INVALID_EMAIL: &str = "should be an email";
const REJECTED: &str = "was rejected by the form backend";

/// Key for errors that are not bound to one of the inputs.
const FORM_ERRORS: &str = "form";

#[derive(Debug, Clone)]
pub struct FormFeatureServiceImpl<FormBackendApi, Template> {
    form_backend_api: FormBackendApi,
    template: Template,
    config: FormFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct FormFeatureConfig {
    pub owner_name: Arc<str>,
    pub homepage: Arc<str>,
    pub fallback_contact: Arc<EmailAddress>,
    /// Render the hidden honeypot input.
    pub honeypot: bool,
}

impl<FormBackendApi, Template> FormFeatureServiceImpl<FormBackendApi, Template> {
    pub fn new(
        form_backend_api: FormBackendApi,
        template: Template,
        config: FormFeatureConfig,
    ) -> Self {
        Self {
            form_backend_api,
            template,
            config,
        }
    }
}

impl<FormBackendApi, Template> FormFeatureService
    for FormFeatureServiceImpl<FormBackendApi, Template>
where
    FormBackendApi: FormBackendApiService,
    Template: TemplateService,
{
    fn get_page(&self, product: Option<QueryValue>) -> FeedbackPage {
        FeedbackPage::from_query(product.as_ref())
    }

    async fn submit(&self, values: FeedbackFormValues) -> Result<SubmissionState, FormSubmitError> {
        let mut state = SubmissionState::default();
        state.begin()?;

        let submission = match check_constraints(&values) {
            Ok(submission) => submission,
            Err(errors) => {
                debug!(?errors, "feedback does not satisfy the form constraints");
                state.fail(errors)?;
                return Ok(state);
            }
        };

        match self.form_backend_api.submit(submission).await {
            Ok(FormBackendResponse::Accepted) => {
                info!(product = %values.product, "feedback submitted");
                state.succeed()?;
            }
            Ok(FormBackendResponse::Rejected(mut errors)) => {
                debug!(?errors, "form backend rejected feedback");
                if errors.is_empty() {
                    errors.push(FORM_ERRORS, REJECTED);
                }
                state.fail(errors)?;
            }
            Ok(FormBackendResponse::Failed { status }) => {
                error!(status, "form backend failed to accept feedback");
                state.fail(FieldErrors::default())?;
            }
            Err(err) => {
                error!("Failed to submit feedback: {err:#}");
                state.fail(FieldErrors::default())?;
            }
        }

        Ok(state)
    }

    fn render_page(
        &self,
        page: &FeedbackPage,
        state: &SubmissionState,
        values: &FeedbackFormValues,
    ) -> anyhow::Result<String> {
        let errors = state.errors();
        let field_errors = |field: FeedbackField| {
            errors
                .get(field.as_str())
                .iter()
                .map(|message| format!("{} {message}", field.label()))
                .collect::<Vec<_>>()
        };
        let form_errors = errors
            .iter()
            .filter(|&(field, _)| FeedbackField::from_name(field).is_none())
            .flat_map(|(_, messages)| messages.iter().cloned())
            .collect();

        let template = FeedbackPageTemplate {
            title: page.title.to_string(),
            owner_name: self.config.owner_name.to_string(),
            homepage: self.config.homepage.to_string(),
            product: page.product.clone(),
            succeeded: state.is_succeeded(),
            failed: state.is_backend_failure(),
            fallback_contact: self.config.fallback_contact.to_string(),
            honeypot_name: self.config.honeypot.then(|| HONEYPOT_FIELD.into()),
            values: FeedbackPageValues {
                name: values.name.clone(),
                email: values.email.clone(),
                message: values.message.clone(),
            },
            errors: FeedbackPageErrors {
                name: field_errors(FeedbackField::Name),
                email: field_errors(FeedbackField::Email),
                message: field_errors(FeedbackField::Message),
                form: form_errors,
            },
        };

        self.template.render(&template)
    }
}

/// Apply the constraints the rendered form declares (`required`,
/// `type="email"`, `minlength`, `maxlength`), so that submissions that bypass
/// the browser get the same treatment.
fn check_constraints(values: &FeedbackFormValues) -> Result<FeedbackSubmission, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = match values.name.trim() {
        "" => None,
        name => FeedbackAuthorName::try_new(name)
            .inspect_err(|_| {
                errors.push(
                    FeedbackField::Name.as_str(),
                    format!(
                        "should be at most {} characters",
                        FeedbackAuthorName::MAX_LEN
                    ),
                )
            })
            .ok(),
    };

    let email = match values.email.trim() {
        "" => {
            errors.push(FeedbackField::Email.as_str(), REQUIRED);
            None
        }
        email => EmailAddress::try_new(email)
            .inspect_err(|_| errors.push(FeedbackField::Email.as_str(), INVALID_EMAIL))
            .ok(),
    };

    let message = if values.message.trim().is_empty() {
        errors.push(FeedbackField::Message.as_str(), REQUIRED);
        None
    } else {
        let len = values.message.chars().count();
        FeedbackMessage::try_new(values.message.as_str())
            .inspect_err(|_| {
                let message = if len < FeedbackMessage::MIN_LEN {
                    format!("should be at least {} characters", FeedbackMessage::MIN_LEN)
                } else {
                    format!("should be at most {} characters", FeedbackMessage::MAX_LEN)
                };
                errors.push(FeedbackField::Message.as_str(), message);
            })
            .ok()
    };

    match (email, message) {
        (Some(email), Some(message)) if errors.is_empty() => Ok(FeedbackSubmission {
            name,
            email,
            message,
            product: ProductName::try_new(ProductName::clamp(&values.product)).ok(),
            honeypot: values.honeypot.clone().filter(|honeypot| !honeypot.is_empty()),
        }),
        _ => Err(errors),
    }
}
