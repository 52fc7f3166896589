use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use chrono::SecondsFormat;
use serde_json::{json, Value};

/// Liveness check with the server's current time
pub async fn ping(State(state): State<AppState>) -> Json<Value> {
    let now = state.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);
    Json(json!({ "ok": true, "now": now }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
