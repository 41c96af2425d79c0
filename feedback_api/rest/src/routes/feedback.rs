use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing, Form, Json, Router,
};
use feedback_core_form_contracts::FormFeatureService;
use feedback_models::{
    form::FeedbackFormValues,
    page::QueryValue,
    submission::{SubmissionState, SubmissionStatus},
};

use super::{internal_server_error, invalid_body};
use crate::models::feedback::{ApiFeedbackForm, ApiSubmissionState};

const PRODUCT_PARAM: &str = "product";

pub fn router(service: Arc<impl FormFeatureService>) -> Router<()> {
    Router::new()
        .route("/", routing::get(get_page).post(submit_form))
        .route("/feedback", routing::post(submit_json))
        .with_state(service)
}

async fn get_page(
    service: State<Arc<impl FormFeatureService>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let product = QueryValue::from_values(
        query
            .into_iter()
            .filter(|(key, _)| key == PRODUCT_PARAM)
            .map(|(_, value)| value),
    );
    let page = service.get_page(product);

    match service.render_page(
        &page,
        &SubmissionState::default(),
        &FeedbackFormValues::default(),
    ) {
        Ok(html) => Html(html).into_response(),
        Err(err) => internal_server_error(err),
    }
}

async fn submit_form(
    service: State<Arc<impl FormFeatureService>>,
    form: Result<Form<ApiFeedbackForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(err) => return invalid_body(err),
    };
    let values = FeedbackFormValues::from(form);
    let page = service.get_page(Some(QueryValue::Single(values.product.clone())));

    let state = match service.submit(values.clone()).await {
        Ok(state) => state,
        Err(err) => return internal_server_error(err),
    };

    let status = if state.is_backend_failure() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    match service.render_page(&page, &state, &values) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => internal_server_error(err),
    }
}

async fn submit_json(
    service: State<Arc<impl FormFeatureService>>,
    form: Result<Json<ApiFeedbackForm>, JsonRejection>,
) -> Response {
    let Json(form) = match form {
        Ok(form) => form,
        Err(err) => return invalid_body(err),
    };
    let state = match service.submit(form.into()).await {
        Ok(state) => state,
        Err(err) => return internal_server_error(err),
    };

    let status = match state.status() {
        SubmissionStatus::Succeeded => StatusCode::OK,
        _ if state.is_backend_failure() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };

    (status, Json(ApiSubmissionState::from(state))).into_response()
}
