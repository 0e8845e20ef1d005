use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use sqlask_core::errors::TranslateError;
use sqlask_core::executor::Executor;
use sqlask_core::pipeline::AskService;
use sqlask_core::providers::llm::fake::FakeClient;
use sqlask_core::storage::store::Store;
use sqlask_core::translator::Translator;
use sqlask_server::routes::router;
use sqlask_server::state::AppState;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn app_with(client: FakeClient) -> (TempDir, AppState) {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("ecommerce.db");
    Store::rebuild(&db).unwrap();
    let service = AskService::new(Translator::new(Arc::new(client)), Executor::new(db));
    (dir, AppState::new(service))
}

fn ask_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ask")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ask_returns_rows() {
    let (_dir, state) = app_with(FakeClient::with_sql("SELECT SUM(amount) FROM total_sales"));
    let resp = router(state)
        .oneshot(ask_request(r#"{"question": "What are the total sales?"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({ "answer": [[2800.5]] }));
}

#[tokio::test]
async fn test_ask_multi_column_rows() {
    let (_dir, state) = app_with(FakeClient::with_sql(
        "SELECT id, user_id, status FROM eligibility ORDER BY id",
    ));
    let resp = router(state)
        .oneshot(ask_request(r#"{"question": "who is eligible?"}"#))
        .await
        .unwrap();

    assert_eq!(
        json_body(resp).await,
        json!({ "answer": [[1, "user123", "eligible"], [2, "user456", "not eligible"]] })
    );
}

#[tokio::test]
async fn test_ask_reports_execution_error() {
    let (_dir, state) = app_with(FakeClient::with_sql("SELECT nope FROM total_sales"));
    let resp = router(state)
        .oneshot(ask_request(r#"{"question": "?"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["kind"], "execution");
    assert!(body["error"].as_str().unwrap().contains("no such column"));
    assert!(body.get("answer").is_none());
}

#[tokio::test]
async fn test_ask_reports_translation_error_without_rows() {
    let (_dir, state) = app_with(FakeClient::failing(|| TranslateError::Timeout(30_000)));
    let resp = router(state)
        .oneshot(ask_request(r#"{"question": "total sales"}"#))
        .await
        .unwrap();

    let body = json_body(resp).await;
    assert_eq!(body["kind"], "timeout");
    assert!(body.get("answer").is_none());
}

#[tokio::test]
async fn test_empty_question_gets_payload() {
    let (_dir, state) = app_with(FakeClient::with_sql("SELECT COUNT(*) FROM eligibility"));
    let resp = router(state)
        .oneshot(ask_request(r#"{"question": ""}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert!(body.get("answer").is_some() || body.get("error").is_some());
}

#[tokio::test]
async fn test_missing_question_is_rejected() {
    let (_dir, state) = app_with(FakeClient::with_sql("SELECT 1"));
    let resp = router(state)
        .oneshot(ask_request(r#"{"q": "hi"}"#))
        .await
        .unwrap();
    assert!(resp.status().is_client_error(), "{}", resp.status());
}

#[tokio::test]
async fn test_root_serves_builtin_page() {
    let (_dir, state) = app_with(FakeClient::with_sql("SELECT 1"));
    let resp = router(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ctype = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(ctype.starts_with("text/html"), "{ctype}");
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("fetch(\"/ask\""));
}

#[tokio::test]
async fn test_root_serves_configured_page_and_static_dir() {
    let (dir, state) = app_with(FakeClient::with_sql("SELECT 1"));
    let index = dir.path().join("index.html");
    std::fs::write(&index, "<h1>custom</h1>").unwrap();
    std::fs::write(dir.path().join("app.css"), "body{}").unwrap();

    let app = router(
        state
            .with_index_path(Some(index))
            .with_static_dir(Some(dir.path().to_path_buf())),
    );

    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>custom</h1>");

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/static/app.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_index_file_is_404() {
    let (dir, state) = app_with(FakeClient::with_sql("SELECT 1"));
    let app = router(state.with_index_path(Some(dir.path().join("gone.html"))));
    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(json_body(resp).await["error"]
        .as_str()
        .unwrap()
        .contains("front page unavailable"));
}

#[tokio::test]
async fn test_health() {
    let (_dir, state) = app_with(FakeClient::with_sql("SELECT 1"));
    let resp = router(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(json_body(resp).await, json!({ "status": "ok" }));
}
