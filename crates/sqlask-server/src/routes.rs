use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use sqlask_core::model::{AskResponse, Question};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

const BUILTIN_INDEX: &str = include_str!("../static/index.html");

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(index))
        .route("/ask", post(ask))
        .route("/health", get(health));

    if let Some(dir) = &state.static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tracing::instrument(name = "ask", skip_all)]
pub async fn ask(State(state): State<AppState>, Json(query): Json<Question>) -> Json<AskResponse> {
    Json(state.service.ask(&query.question).await)
}

pub async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    match &state.index_path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map(Html)
            .map_err(ApiError::IndexUnavailable),
        None => Ok(Html(BUILTIN_INDEX.to_string())),
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
