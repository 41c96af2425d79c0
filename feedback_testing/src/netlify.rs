use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, http::StatusCode, routing, Form, Router};
use tracing::info;

use crate::FAILING_EMAIL_DOMAIN;

pub fn router(form_name: String) -> Router {
    Router::new()
        .route("/", routing::post(submit))
        .with_state(Arc::<str>::from(form_name))
}

pub fn log_usage(form_name: &str) {
    info!("Form action: / with form name {form_name:?}");
    info!("Emails ending in {FAILING_EMAIL_DOMAIN:?} cause an internal server error");
}

async fn submit(
    state: State<Arc<str>>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    if fields.get("form-name").map(String::as_str) != Some(&**state) {
        return (StatusCode::NOT_FOUND, "Form not found");
    }

    let email = fields.get("email").map(String::as_str).unwrap_or_default();
    if email.ends_with(FAILING_EMAIL_DOMAIN) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }

    let spam = fields
        .get("bot-field")
        .is_some_and(|honeypot| !honeypot.is_empty());
    info!(%email, spam, "accepted submission");

    (StatusCode::OK, "Thank you for your submission")
}
