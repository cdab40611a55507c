use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use talentflow_backend::dto::job_dto::CreateJobPayload;
use talentflow_backend::{routes, AppState};

async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

async fn setup() -> (Router, AppState) {
    let state = AppState::new(test_pool().await);
    let app = Router::new()
        .route(
            "/assessments/:job_id",
            get(routes::assessment_routes::get_assessment)
                .post(routes::assessment_routes::save_assessment),
        )
        .route(
            "/assessments/:job_id/submit",
            post(routes::assessment_routes::submit_assessment),
        )
        .with_state(state.clone());
    (app, state)
}

async fn seed_job(state: &AppState, title: &str) -> Uuid {
    state
        .job_service
        .create(CreateJobPayload {
            title: title.to_string(),
            slug: None,
            status: None,
            tags: Vec::new(),
            department: None,
            location: None,
            order: None,
        })
        .await
        .expect("seed job")
        .id
}

fn numeric_assessment() -> JsonValue {
    json!({
        "sections": [{
            "id": "sec-0",
            "title": "Screening",
            "questions": [{
                "id": "q1",
                "type": "numeric",
                "question": "Years of Rust experience?",
                "required": true,
                "min": 1,
                "max": 5
            }]
        }]
    })
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post_json(app: &Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn save_replaces_the_tree_wholesale() {
    let (app, state) = setup().await;
    let job_id = seed_job(&state, "Backend Engineer").await;

    let (status, body) = post_json(
        &app,
        &format!("/assessments/{}", job_id),
        numeric_assessment(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sections"][0]["questions"][0]["id"], "q1");

    // A second save fully replaces the first tree.
    let (status, _) = post_json(
        &app,
        &format!("/assessments/{}", job_id),
        json!({ "sections": [{ "id": "sec-1", "title": "Culture", "questions": [] }] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&app, &format!("/assessments/{}", job_id)).await;
    assert_eq!(status, StatusCode::OK);
    let sections = body["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["id"], "sec-1");
}

#[tokio::test]
async fn save_for_missing_job_yields_404() {
    let (app, _state) = setup().await;
    let (status, body) = post_json(
        &app,
        &format!("/assessments/{}", Uuid::new_v4()),
        numeric_assessment(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Job not found");
}

#[tokio::test]
async fn missing_assessment_yields_404() {
    let (app, state) = setup().await;
    let job_id = seed_job(&state, "Backend Engineer").await;
    let (status, body) = get_json(&app, &format!("/assessments/{}", job_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Assessment not found");
}

#[tokio::test]
async fn numeric_above_max_blocks_submission() {
    let (app, state) = setup().await;
    let job_id = seed_job(&state, "Backend Engineer").await;
    post_json(
        &app,
        &format!("/assessments/{}", job_id),
        numeric_assessment(),
    )
    .await;

    let (status, body) = post_json(
        &app,
        &format!("/assessments/{}/submit", job_id),
        json!({ "responses": { "q1": 6 } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Please fix validation errors before submitting."
    );
    assert_eq!(body["errors"]["q1"], "Maximum value is 5.");

    // Nothing was persisted.
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assessment_responses")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn required_multi_needs_a_selection() {
    let (app, state) = setup().await;
    let job_id = seed_job(&state, "Backend Engineer").await;
    post_json(
        &app,
        &format!("/assessments/{}", job_id),
        json!({
            "sections": [{
                "id": "sec-0",
                "title": "Screening",
                "questions": [{
                    "id": "q1",
                    "type": "multi",
                    "question": "Which stacks have you used?",
                    "options": ["axum", "actix", "rocket"],
                    "required": true
                }]
            }]
        }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        &format!("/assessments/{}/submit", job_id),
        json!({ "responses": { "q1": [] } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["q1"], "Please select at least one option.");
}

#[tokio::test]
async fn text_over_max_length_blocks_submission() {
    let (app, state) = setup().await;
    let job_id = seed_job(&state, "Backend Engineer").await;
    post_json(
        &app,
        &format!("/assessments/{}", job_id),
        json!({
            "sections": [{
                "id": "sec-0",
                "title": "Screening",
                "questions": [{
                    "id": "q1",
                    "type": "shortText",
                    "question": "One-line summary",
                    "maxLength": 10
                }]
            }]
        }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        &format!("/assessments/{}/submit", job_id),
        json!({ "responses": { "q1": "way past the ten character limit" } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["q1"], "Maximum length is 10 characters.");
}

#[tokio::test]
async fn valid_submission_is_persisted_wholesale() {
    let (app, state) = setup().await;
    let job_id = seed_job(&state, "Backend Engineer").await;
    post_json(
        &app,
        &format!("/assessments/{}", job_id),
        numeric_assessment(),
    )
    .await;

    let (status, body) = post_json(
        &app,
        &format!("/assessments/{}/submit", job_id),
        json!({ "responses": { "q1": 3 } }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();
    assert!(Uuid::parse_str(&id).is_ok());

    let stored = sqlx::query_scalar::<_, String>(
        "SELECT responses FROM assessment_responses WHERE job_id = ?",
    )
    .bind(job_id)
    .fetch_one(&state.pool)
    .await
    .unwrap();
    let stored: JsonValue = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored["q1"], 3);
}

#[tokio::test]
async fn submit_without_assessment_yields_404() {
    let (app, state) = setup().await;
    let job_id = seed_job(&state, "Backend Engineer").await;

    let (status, body) = post_json(
        &app,
        &format!("/assessments/{}/submit", job_id),
        json!({ "responses": {} }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Assessment not found");
}
