use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. The service holds no connections worth checking, so
/// being able to answer is the whole check.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "quizgen-service",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.generator.model(),
    }))
}
