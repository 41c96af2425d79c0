use std::sync::Arc;

use anyhow::Context;
use feedback_extern_contracts::form_backend::{FormBackendApiService, FormBackendResponse};
use feedback_models::form::{FeedbackSubmission, FieldErrors};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

const ENDPOINT: &str = "https://api.statickit.com/";

/// Field name StaticKit uses for errors that are not bound to a field.
const FORM_FIELD: &str = "form";

#[derive(Debug, Clone)]
pub struct StaticKitApiServiceImpl {
    config: StaticKitApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct StaticKitApiServiceConfig {
    submissions_url: Arc<Url>,
}

impl StaticKitApiServiceConfig {
    /// `endpoint_override` must end with a `/`.
    pub fn new(site: &str, form_key: &str, endpoint_override: Option<Url>) -> anyhow::Result<Self> {
        let endpoint = match endpoint_override {
            Some(endpoint) => endpoint,
            None => ENDPOINT.parse().context("Invalid statickit endpoint")?,
        };

        let submissions_url = endpoint
            .join(&format!("j/sites/{site}/forms/{form_key}/submissions"))
            .context("Failed to build statickit submissions URL")?;

        Ok(Self {
            submissions_url: submissions_url.into(),
        })
    }

    pub fn submissions_url(&self) -> &Url {
        &self.submissions_url
    }
}

impl StaticKitApiServiceImpl {
    pub fn new(config: StaticKitApiServiceConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

impl FormBackendApiService for StaticKitApiServiceImpl {
    async fn submit(&self, submission: FeedbackSubmission) -> anyhow::Result<FormBackendResponse> {
        let request = SubmissionRequest {
            name: submission.name.as_deref().map(String::as_str),
            email: submission.email.as_str(),
            message: submission.message.as_str(),
            product: submission.product.as_deref().map(String::as_str),
        };

        let response = self
            .http
            .post((*self.config.submissions_url).clone())
            .json(&request)
            .send()
            .await
            .context("Failed to send statickit submission")?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "statickit accepted submission");
            return Ok(FormBackendResponse::Accepted);
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let errors = response
                .json::<SubmissionErrorResponse>()
                .await
                .context("Failed to deserialize statickit error response")?
                .errors
                .into_iter()
                .map(|error| {
                    debug!(field = ?error.field, code = ?error.code, "statickit rejected field");
                    (error.field.unwrap_or_else(|| FORM_FIELD.into()), error.message)
                })
                .collect::<FieldErrors>();
            return Ok(FormBackendResponse::Rejected(errors));
        }

        warn!(%status, "statickit returned an unexpected status");
        Ok(FormBackendResponse::Failed {
            status: status.as_u16(),
        })
    }
}

#[derive(Serialize)]
struct SubmissionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<&'a str>,
}

#[derive(Deserialize)]
struct SubmissionErrorResponse {
    #[serde(default)]
    errors: Vec<SubmissionError>,
}

#[derive(Deserialize)]
struct SubmissionError {
    field: Option<String>,
    message: String,
    code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submissions_url() {
        let config = StaticKitApiServiceConfig::new("54e274d4bc01", "feedback", None).unwrap();
        assert_eq!(
            config.submissions_url().as_str(),
            "https://api.statickit.com/j/sites/54e274d4bc01/forms/feedback/submissions"
        );
    }

    #[test]
    fn submissions_url_override() {
        let config = StaticKitApiServiceConfig::new(
            "site",
            "key",
            Some("http://127.0.0.1:8001/".parse().unwrap()),
        )
        .unwrap();
        assert_eq!(
            config.submissions_url().as_str(),
            "http://127.0.0.1:8001/j/sites/site/forms/key/submissions"
        );
    }
}
