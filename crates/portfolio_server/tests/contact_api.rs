use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use portfolio_core::{
    ContactForm, ContactRepository, ContactSubmission, InMemoryContactRepository, RepoError,
    RepoResult, SubmissionId,
};
use portfolio_server::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Fresh router over its own store; the store is returned for assertions.
fn test_app() -> (Router, Arc<InMemoryContactRepository>) {
    let repo = Arc::new(InMemoryContactRepository::new());
    let state = AppState::new(repo.clone());
    (create_router(state, None), repo)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn valid_submission_returns_201_with_first_id() {
    let (app, repo) = test_app();

    let (status, body) = send(
        app,
        post_json(
            "/api/contact",
            &json!({
                "name": "Jo",
                "email": "jo@example.com",
                "message": "Hello there, this is a test."
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"message": "Message received successfully", "id": 1})
    );

    let stored = repo.get_by_id(1).unwrap().unwrap();
    assert_eq!(stored.name, "Jo");
    assert_eq!(stored.subject, None);
}

#[tokio::test]
async fn invalid_submission_returns_400_with_three_field_errors() {
    let (app, repo) = test_app();

    let (status, body) = send(
        app,
        post_json(
            "/api/contact",
            &json!({"name": "J", "email": "bad", "message": "short"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid form data");
    let fields: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["name", "email", "message"]);
    assert_eq!(
        body["errors"][1]["message"],
        "Please enter a valid email address"
    );
    assert!(repo.is_empty().unwrap());
}

#[tokio::test]
async fn concurrent_submissions_get_distinct_sequential_ids() {
    let (app, repo) = test_app();
    let first = json!({
        "name": "Alice",
        "email": "alice@example.com",
        "subject": "Hi",
        "message": "First concurrent message."
    });
    let second = json!({
        "name": "Bob",
        "email": "bob@example.com",
        "message": "Second concurrent message."
    });

    let (a, b) = tokio::join!(
        send(app.clone(), post_json("/api/contact", &first)),
        send(app.clone(), post_json("/api/contact", &second)),
    );

    assert_eq!(a.0, StatusCode::CREATED);
    assert_eq!(b.0, StatusCode::CREATED);
    let mut ids = vec![a.1["id"].as_u64().unwrap(), b.1["id"].as_u64().unwrap()];
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2]);

    let names: Vec<_> = repo
        .list_all()
        .unwrap()
        .into_iter()
        .map(|submission| submission.name)
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Alice".to_string()));
    assert!(names.contains(&"Bob".to_string()));
}

#[tokio::test]
async fn malformed_json_returns_400_without_field_errors() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Invalid request body"}));
}

#[tokio::test]
async fn non_object_json_returns_400_without_field_errors() {
    let (app, _) = test_app();
    let (status, body) = send(app, post_json("/api/contact", &json!(["Jo"]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Invalid request body"}));
}

#[tokio::test]
async fn empty_object_reports_required_fields() {
    let (app, _) = test_app();
    let (status, body) = send(app, post_json("/api/contact", &json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let codes: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["required", "required", "required"]);
}

fn post_raw(content_type: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/api/contact");
    if let Some(value) = content_type {
        builder = builder.header(header::CONTENT_TYPE, value);
    }
    builder.body(body.into()).unwrap()
}

#[tokio::test]
async fn urlencoded_form_post_is_accepted() {
    let (app, repo) = test_app();
    let request = post_raw(
        Some("application/x-www-form-urlencoded"),
        "name=Jo&email=jo%40example.com&subject=&message=Hello+there%2C+this+is+a+test.",
    );

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);

    let stored = repo.get_by_id(1).unwrap().unwrap();
    assert_eq!(stored.email, "jo@example.com");
    assert_eq!(stored.subject, None);
    assert_eq!(stored.message, "Hello there, this is a test.");
}

#[tokio::test]
async fn urlencoded_form_post_is_validated() {
    let (app, repo) = test_app();
    let (status, body) = send(
        app,
        post_raw(Some("application/x-www-form-urlencoded"), "name=J&email=bad"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let codes: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["too_small", "invalid_email", "required"]);
    assert!(repo.is_empty().unwrap());
}

#[tokio::test]
async fn body_without_known_content_type_is_an_empty_form() {
    for content_type in [None, Some("text/plain")] {
        let (app, repo) = test_app();
        let (status, body) = send(
            app,
            post_raw(
                content_type,
                r#"{"name":"Jo","email":"jo@example.com","message":"Hello there, this is a test."}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "content type {content_type:?}");
        assert_eq!(body["message"], "Invalid form data");
        assert_eq!(body["errors"].as_array().unwrap().len(), 3);
        assert!(repo.is_empty().unwrap());
    }
}

#[tokio::test]
async fn oversized_json_body_returns_413() {
    let (app, repo) = test_app();
    let message = "a".repeat(3 * 1024 * 1024);
    let (status, body) = send(
        app,
        post_json(
            "/api/contact",
            &json!({"name": "Jo", "email": "jo@example.com", "message": message}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({"message": "Request body too large"}));
    assert!(repo.is_empty().unwrap());
}

struct FailingRepository;

impl ContactRepository for FailingRepository {
    fn create(&self, _form: ContactForm) -> RepoResult<ContactSubmission> {
        Err(RepoError::Poisoned)
    }

    fn get_by_id(&self, _id: SubmissionId) -> RepoResult<Option<ContactSubmission>> {
        Err(RepoError::Poisoned)
    }

    fn list_all(&self) -> RepoResult<Vec<ContactSubmission>> {
        Err(RepoError::Poisoned)
    }

    fn len(&self) -> RepoResult<usize> {
        Err(RepoError::Poisoned)
    }
}

#[tokio::test]
async fn storage_failure_returns_generic_500() {
    let app = create_router(AppState::new(Arc::new(FailingRepository)), None);

    let (status, body) = send(
        app,
        post_json(
            "/api/contact",
            &json!({
                "name": "Jo",
                "email": "jo@example.com",
                "message": "Hello there, this is a test."
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"message": "Failed to process your message. Please try again."})
    );
}

#[tokio::test]
async fn storage_failure_does_not_mask_validation_errors() {
    let app = create_router(AppState::new(Arc::new(FailingRepository)), None);
    let (status, body) = send(
        app,
        post_json("/api/contact", &json!({"name": "J", "email": "bad", "message": "short"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_route_returns_json_404_without_static_site() {
    let (app, _) = test_app();
    let request = Request::builder()
        .uri("/api/unknown")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Not Found"}));
}

#[tokio::test]
async fn get_on_contact_route_is_not_allowed() {
    let (app, _) = test_app();
    let request = Request::builder()
        .uri("/api/contact")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
