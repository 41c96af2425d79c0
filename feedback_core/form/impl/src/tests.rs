use feedback_extern_contracts::form_backend::MockFormBackendApiService;
use feedback_models::{form::ProductName, submission::SubmissionStatus};
use feedback_templates_contracts::MockTemplateService;
use feedback_utils::assert_matches;

use super::*;

const MESSAGE: &str = "This is a very helpful message.";

fn config() -> FormFeatureConfig {
    FormFeatureConfig {
        owner_name: "example.com".into(),
        homepage: "https://example.com/".into(),
        fallback_contact: EmailAddress::try_new("feedback@example.com").unwrap().into(),
        honeypot: false,
    }
}

fn values() -> FeedbackFormValues {
    FeedbackFormValues {
        name: " Max Mustermann ".into(),
        email: "max.mustermann@example.de".into(),
        message: MESSAGE.into(),
        product: " Todo ".into(),
        honeypot: None,
    }
}

fn submission() -> FeedbackSubmission {
    FeedbackSubmission {
        name: Some(FeedbackAuthorName::try_new("Max Mustermann").unwrap()),
        email: EmailAddress::try_new("max.mustermann@example.de").unwrap(),
        message: FeedbackMessage::try_new(MESSAGE).unwrap(),
        product: Some(ProductName::try_new("Todo").unwrap()),
        honeypot: None,
    }
}

fn make_sut(
    form_backend_api: MockFormBackendApiService,
    template: MockTemplateService,
) -> FormFeatureServiceImpl<MockFormBackendApiService, MockTemplateService> {
    FormFeatureServiceImpl {
        form_backend_api,
        template,
        config: config(),
    }
}

fn page_template(state: &SubmissionState) -> FeedbackPageTemplate {
    FeedbackPageTemplate {
        title: "Feedback for Todo".into(),
        owner_name: "example.com".into(),
        homepage: "https://example.com/".into(),
        product: "Todo".into(),
        succeeded: state.is_succeeded(),
        failed: state.is_backend_failure(),
        fallback_contact: "feedback@example.com".into(),
        honeypot_name: None,
        values: FeedbackPageValues {
            name: " Max Mustermann ".into(),
            email: "max.mustermann@example.de".into(),
            message: MESSAGE.into(),
        },
        errors: FeedbackPageErrors::default(),
    }
}

fn failed(errors: FieldErrors) -> SubmissionState {
    let mut state = SubmissionState::default();
    state.begin().unwrap();
    state.fail(errors).unwrap();
    state
}

#[test]
fn get_page() {
    // Arrange
    let sut = make_sut(MockFormBackendApiService::new(), MockTemplateService::new());

    // Act
    let result = sut.get_page(Some(QueryValue::List(vec![
        QueryValue::Single(" Todo ".into()),
        QueryValue::Single("Other".into()),
    ])));

    // Assert
    assert_eq!(result.title.as_str(), "Feedback for Todo");
    assert_eq!(result.product, "Todo");
}

#[test]
fn get_page_default_title() {
    // Arrange
    let sut = make_sut(MockFormBackendApiService::new(), MockTemplateService::new());

    // Act
    let absent = sut.get_page(None);
    let empty = sut.get_page(Some(QueryValue::List(vec![])));

    // Assert
    assert_eq!(absent.title.as_str(), "Feedback");
    assert_eq!(empty.title.as_str(), "Feedback");
}

#[tokio::test]
async fn submit_ok() {
    // Arrange
    let form_backend_api = MockFormBackendApiService::new()
        .with_submit(submission(), Ok(FormBackendResponse::Accepted));

    let sut = make_sut(form_backend_api, MockTemplateService::new());

    // Act
    let result = sut.submit(values()).await;

    // Assert
    let state = result.unwrap();
    assert_eq!(state.status(), SubmissionStatus::Succeeded);
    assert!(state.errors().is_empty());
}

#[tokio::test]
async fn submit_forwards_honeypot() {
    // Arrange
    let form_backend_api = MockFormBackendApiService::new().with_submit(
        FeedbackSubmission {
            honeypot: Some("spam".into()),
            ..submission()
        },
        Ok(FormBackendResponse::Accepted),
    );

    let sut = make_sut(form_backend_api, MockTemplateService::new());

    // Act
    let result = sut
        .submit(FeedbackFormValues {
            honeypot: Some("spam".into()),
            ..values()
        })
        .await;

    // Assert
    assert!(result.unwrap().is_succeeded());
}

#[tokio::test]
async fn submit_optional_fields_empty() {
    // Arrange
    let form_backend_api = MockFormBackendApiService::new().with_submit(
        FeedbackSubmission {
            name: None,
            product: None,
            ..submission()
        },
        Ok(FormBackendResponse::Accepted),
    );

    let sut = make_sut(form_backend_api, MockTemplateService::new());

    // Act
    let result = sut
        .submit(FeedbackFormValues {
            name: "  ".into(),
            product: String::new(),
            honeypot: Some(String::new()),
            ..values()
        })
        .await;

    // Assert
    assert!(result.unwrap().is_succeeded());
}

#[tokio::test]
async fn submit_missing_email() {
    // Arrange
    let sut = make_sut(MockFormBackendApiService::new(), MockTemplateService::new());

    // Act
    let result = sut
        .submit(FeedbackFormValues {
            email: " ".into(),
            ..values()
        })
        .await;

    // Assert
    let state = result.unwrap();
    assert_eq!(state.status(), SubmissionStatus::Failed);
    assert_eq!(state.errors().get("email"), ["is required"]);
    assert!(!state.is_backend_failure());
}

#[tokio::test]
async fn submit_malformed_email() {
    for email in ["max", "max@", "max@example", "max mustermann@example.de"] {
        // Arrange
        let sut = make_sut(MockFormBackendApiService::new(), MockTemplateService::new());

        // Act
        let result = sut
            .submit(FeedbackFormValues {
                email: email.into(),
                ..values()
            })
            .await;

        // Assert
        let state = result.unwrap();
        assert!(!state.is_succeeded(), "{email:?} succeeded");
        assert_eq!(state.errors().get("email"), ["should be an email"]);
    }
}

#[tokio::test]
async fn submit_message_constraints() {
    for (message, expected) in [
        ("", "is required"),
        ("   ", "is required"),
        ("Too short.", "should be at least 20 characters"),
    ] {
        // Arrange
        let sut = make_sut(MockFormBackendApiService::new(), MockTemplateService::new());

        // Act
        let result = sut
            .submit(FeedbackFormValues {
                message: message.into(),
                ..values()
            })
            .await;

        // Assert
        let state = result.unwrap();
        assert!(state.is_failed());
        assert_eq!(state.errors().get("message"), [expected]);
        assert!(state.errors().get("email").is_empty());
    }
}

#[tokio::test]
async fn submit_message_too_long() {
    // Arrange
    let sut = make_sut(MockFormBackendApiService::new(), MockTemplateService::new());

    // Act
    let result = sut
        .submit(FeedbackFormValues {
            message: "x".repeat(FeedbackMessage::MAX_LEN + 1),
            ..values()
        })
        .await;

    // Assert
    assert_eq!(
        result.unwrap().errors().get("message"),
        ["should be at most 4096 characters"]
    );
}

#[tokio::test]
async fn submit_name_too_long() {
    // Arrange
    let sut = make_sut(MockFormBackendApiService::new(), MockTemplateService::new());

    // Act
    let result = sut
        .submit(FeedbackFormValues {
            name: "x".repeat(FeedbackAuthorName::MAX_LEN + 1),
            ..values()
        })
        .await;

    // Assert
    assert_eq!(
        result.unwrap().errors().get("name"),
        ["should be at most 256 characters"]
    );
}

#[tokio::test]
async fn submit_rejected_by_backend() {
    // Arrange
    let errors = [("email", "should be an email")]
        .into_iter()
        .collect::<FieldErrors>();
    let form_backend_api = MockFormBackendApiService::new()
        .with_submit(submission(), Ok(FormBackendResponse::Rejected(errors.clone())));

    let sut = make_sut(form_backend_api, MockTemplateService::new());

    // Act
    let result = sut.submit(values()).await;

    // Assert
    let state = result.unwrap();
    assert_eq!(state.status(), SubmissionStatus::Failed);
    assert_eq!(state.errors(), &errors);
}

#[tokio::test]
async fn submit_rejected_without_errors() {
    // Arrange
    let form_backend_api = MockFormBackendApiService::new().with_submit(
        submission(),
        Ok(FormBackendResponse::Rejected(FieldErrors::default())),
    );

    let sut = make_sut(form_backend_api, MockTemplateService::new());

    // Act
    let result = sut.submit(values()).await;

    // Assert
    let state = result.unwrap();
    assert!(state.is_failed());
    assert!(!state.is_backend_failure());
    assert_eq!(
        state.errors().get("form"),
        ["was rejected by the form backend"]
    );
}

#[tokio::test]
async fn submit_long_product_is_clamped() {
    // Arrange
    let product = "x".repeat(ProductName::MAX_LEN);
    let form_backend_api = MockFormBackendApiService::new().with_submit(
        FeedbackSubmission {
            product: Some(ProductName::try_new(product.as_str()).unwrap()),
            ..submission()
        },
        Ok(FormBackendResponse::Accepted),
    );

    let sut = make_sut(form_backend_api, MockTemplateService::new());

    // Act
    let result = sut
        .submit(FeedbackFormValues {
            product: format!(" {product}yyy "),
            ..values()
        })
        .await;

    // Assert
    assert!(result.unwrap().is_succeeded());
}

#[tokio::test]
async fn submit_backend_status() {
    // Arrange
    let form_backend_api = MockFormBackendApiService::new()
        .with_submit(submission(), Ok(FormBackendResponse::Failed { status: 503 }));

    let sut = make_sut(form_backend_api, MockTemplateService::new());

    // Act
    let result = sut.submit(values()).await;

    // Assert
    let state = result.unwrap();
    assert!(state.is_backend_failure());
}

#[tokio::test]
async fn submit_backend_unreachable() {
    // Arrange
    let form_backend_api = MockFormBackendApiService::new()
        .with_submit(submission(), Err(anyhow::anyhow!("connection refused")));

    let sut = make_sut(form_backend_api, MockTemplateService::new());

    // Act
    let result = sut.submit(values()).await;

    // Assert
    assert_matches!(result, Ok(state) if state.is_backend_failure());
}

#[test]
fn render_idle() {
    // Arrange
    let state = SubmissionState::default();
    let template =
        MockTemplateService::new().with_render(page_template(&state), "idle".into());

    let sut = make_sut(MockFormBackendApiService::new(), template);
    let page = sut.get_page(Some(QueryValue::Single("Todo".into())));

    // Act
    let result = sut.render_page(&page, &state, &values());

    // Assert
    assert_eq!(result.unwrap(), "idle");
}

#[test]
fn render_backend_failure() {
    // Arrange
    let state = failed(FieldErrors::default());
    let expected = FeedbackPageTemplate {
        failed: true,
        ..page_template(&state)
    };
    let template = MockTemplateService::new().with_render(expected, "failed".into());

    let sut = make_sut(MockFormBackendApiService::new(), template);
    let page = sut.get_page(Some(QueryValue::Single("Todo".into())));

    // Act
    let result = sut.render_page(&page, &state, &values());

    // Assert
    assert_eq!(result.unwrap(), "failed");
}

#[test]
fn render_validation_errors() {
    // Arrange
    let state = failed(
        [
            ("email", "should be an email"),
            ("message", "is required"),
            ("form", "has too many submissions"),
        ]
        .into_iter()
        .collect(),
    );
    let expected = FeedbackPageTemplate {
        failed: false,
        errors: FeedbackPageErrors {
            name: vec![],
            email: vec!["Email should be an email".into()],
            message: vec!["Message is required".into()],
            form: vec!["has too many submissions".into()],
        },
        ..page_template(&state)
    };
    let template = MockTemplateService::new().with_render(expected, "invalid".into());

    let sut = make_sut(MockFormBackendApiService::new(), template);
    let page = sut.get_page(Some(QueryValue::Single("Todo".into())));

    // Act
    let result = sut.render_page(&page, &state, &values());

    // Assert
    assert_eq!(result.unwrap(), "invalid");
}

#[test]
fn render_honeypot() {
    // Arrange
    let state = SubmissionState::default();
    let expected = FeedbackPageTemplate {
        honeypot_name: Some(HONEYPOT_FIELD.into()),
        ..page_template(&state)
    };
    let template = MockTemplateService::new().with_render(expected, "honeypot".into());

    let sut = FormFeatureServiceImpl {
        form_backend_api: MockFormBackendApiService::new(),
        template,
        config: FormFeatureConfig {
            honeypot: true,
            ..config()
        },
    };
    let page = sut.get_page(Some(QueryValue::Single("Todo".into())));

    // Act
    let result = sut.render_page(&page, &state, &values());

    // Assert
    assert_eq!(result.unwrap(), "honeypot");
}
