//! # mme-api - HTTP Surface of the Model Mapping Editor
//!
//! Serves the single-page editor and exposes one [`EditorSession`] to it.
//! The page's code view, form view, file input, download button and
//! validate button each map to one route; all state lives in the session.
//!
//! ## API Surface
//!
//! | Route                          | Operation |
//! |--------------------------------|-----------|
//! | `GET /`                        | The page |
//! | `GET /v1/schema`               | Schema for the form renderer |
//! | `GET /v1/session`              | Text, mode, validation, validate availability |
//! | `PUT /v1/session/text`         | Code view change |
//! | `GET/POST /v1/session/form`    | Form snapshot / form submit |
//! | `PUT /v1/session/mode`         | Switch views |
//! | `POST /v1/session/upload`      | Load a file |
//! | `GET /v1/session/download`     | Export `model.json` |
//! | `POST /v1/session/validate`    | Validate |
//!
//! [`EditorSession`]: mme_session::EditorSession

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use error::AppError;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Assemble the full application router.
///
/// Text and form bodies share the upload limit, so any document that can be
/// loaded can also be edited.
pub fn app(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);
    let api = Router::new()
        .route("/", get(index))
        .merge(routes::session::router())
        .merge(routes::schema::router())
        .merge(openapi::router())
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// The editor page.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness probe - always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe - the schema is compiled before the router exists.
async fn readiness() -> &'static str {
    "ready"
}
