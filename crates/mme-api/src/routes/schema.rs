//! # Schema API
//!
//! Serves the schema the session validates against, so the form view
//! renders from exactly the same document.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::state::AppState;

/// Build the schema router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/schema", get(get_schema))
}

/// GET /v1/schema - The active model mapping schema.
#[utoipa::path(
    get,
    path = "/v1/schema",
    responses(
        (status = 200, description = "Active JSON Schema"),
    ),
    tag = "schema"
)]
pub(crate) async fn get_schema(State(state): State<AppState>) -> Json<Value> {
    Json(state.schema.schema().clone())
}
