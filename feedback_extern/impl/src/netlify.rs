use std::sync::Arc;

use anyhow::Context;
use feedback_extern_contracts::form_backend::{FormBackendApiService, FormBackendResponse};
use feedback_models::form::FeedbackSubmission;
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

/// Netlify Forms integration. Submissions are posted url-encoded to the
/// site, identified by `form-name`. Spam detection happens on Netlify's side
/// using the honeypot field.
#[derive(Debug, Clone)]
pub struct NetlifyFormsApiServiceImpl {
    config: NetlifyFormsApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct NetlifyFormsApiServiceConfig {
    pub action: Arc<Url>,
    pub form_name: Arc<str>,
    pub honeypot_name: Arc<str>,
}

impl NetlifyFormsApiServiceImpl {
    pub fn new(config: NetlifyFormsApiServiceConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

impl FormBackendApiService for NetlifyFormsApiServiceImpl {
    async fn submit(&self, submission: FeedbackSubmission) -> anyhow::Result<FormBackendResponse> {
        let fields = form_fields(&self.config, &submission);

        let response = self
            .http
            .post((*self.config.action).clone())
            .form(&fields)
            .send()
            .await
            .context("Failed to send netlify form submission")?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, form_name = %self.config.form_name, "netlify accepted submission");
            Ok(FormBackendResponse::Accepted)
        } else {
            warn!(%status, form_name = %self.config.form_name, "netlify returned an unexpected status");
            Ok(FormBackendResponse::Failed {
                status: status.as_u16(),
            })
        }
    }
}

fn form_fields<'a>(
    config: &'a NetlifyFormsApiServiceConfig,
    submission: &'a FeedbackSubmission,
) -> Vec<(&'a str, &'a str)> {
    vec![
        ("form-name", &*config.form_name),
        (
            "name",
            submission.name.as_deref().map_or("", String::as_str),
        ),
        ("email", submission.email.as_str()),
        ("message", submission.message.as_str()),
        (
            "product",
            submission.product.as_deref().map_or("", String::as_str),
        ),
        (
            &*config.honeypot_name,
            submission.honeypot.as_deref().unwrap_or_default(),
        ),
    ]
}
