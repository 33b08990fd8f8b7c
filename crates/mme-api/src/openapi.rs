//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI spec, served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the editor API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Model Mapping Editor API",
        version = "0.1.0",
        description = "Edit a FHIRConnect model mapping as text or as a form, validate it against the model mapping schema, and export it as model.json.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::schema::get_schema,
        crate::routes::session::get_session,
        crate::routes::session::put_text,
        crate::routes::session::get_form,
        crate::routes::session::submit_form,
        crate::routes::session::put_mode,
        crate::routes::session::upload,
        crate::routes::session::download,
        crate::routes::session::validate,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::session::SessionView,
        crate::routes::session::ModeRequest,
    )),
    tags(
        (name = "session", description = "Editor session: views, upload, download, validation"),
        (name = "schema", description = "The fixed model mapping schema"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json - Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
