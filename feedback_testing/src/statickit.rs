use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    FAILING_EMAIL_DOMAIN, GARBLED_EMAIL_DOMAIN, LIMITED_EMAIL_DOMAIN, REJECTED_EMAIL_DOMAIN,
};

pub const SUBMISSIONS_ROUTE: &str = "/j/sites/:site/forms/:key/submissions";

pub fn router(site: String) -> Router {
    Router::new()
        .route(SUBMISSIONS_ROUTE, routing::post(submit))
        .with_state(Arc::<str>::from(site))
}

pub fn log_usage(site: &str) {
    info!("Submissions endpoint: {SUBMISSIONS_ROUTE} with site {site:?}");
    info!("Emails without an @ or ending in {REJECTED_EMAIL_DOMAIN:?} are rejected with a validation error");
    info!("Emails ending in {LIMITED_EMAIL_DOMAIN:?} are rejected with an error without field");
    info!("Emails ending in {GARBLED_EMAIL_DOMAIN:?} are rejected with a body that is not json");
    info!("Emails ending in {FAILING_EMAIL_DOMAIN:?} cause an internal server error");
}

#[derive(Deserialize)]
struct SubmissionRequest {
    email: Option<String>,
    message: Option<String>,
}

async fn submit(
    state: State<Arc<str>>,
    Path((site, key)): Path<(String, String)>,
    Json(request): Json<SubmissionRequest>,
) -> Response {
    if *site != **state {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Site not found"}))).into_response();
    }

    let email = request.email.unwrap_or_default();
    if email.ends_with(FAILING_EMAIL_DOMAIN) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if email.ends_with(GARBLED_EMAIL_DOMAIN) {
        return (StatusCode::UNPROCESSABLE_ENTITY, "<html>Unprocessable</html>").into_response();
    }
    if email.ends_with(LIMITED_EMAIL_DOMAIN) {
        let errors = [json!({"message": "has too many submissions", "code": "RATE_LIMITED"})];
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"errors": errors}))).into_response();
    }

    let mut errors = Vec::new();
    if email.is_empty() {
        errors.push(json!({"field": "email", "message": "is required", "code": "REQUIRED"}));
    } else if !email.contains('@') || email.ends_with(REJECTED_EMAIL_DOMAIN) {
        errors.push(json!({"field": "email", "message": "should be an email", "code": "TYPE_EMAIL"}));
    }
    if request.message.unwrap_or_default().is_empty() {
        errors.push(json!({"field": "message", "message": "is required", "code": "REQUIRED"}));
    }

    if !errors.is_empty() {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"errors": errors}))).into_response();
    }

    info!(%key, %email, "accepted submission");
    Json(json!({"id": "submission", "data": {"email": email}})).into_response()
}
