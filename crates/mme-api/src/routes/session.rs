//! # Editor Session API
//!
//! The two editing views and the session operations behind the page's
//! controls. The code view sends the full text on every change; the form
//! view reads the snapshot and submits an edited object.

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use mme_session::{decode_document, EditorSession, LoadOutcome, ValidationResult, ViewMode};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Full session view, returned after every mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionView {
    /// Current document text.
    pub text: String,
    /// Mounted view: `code` or `form`.
    #[schema(value_type = String)]
    pub mode: ViewMode,
    /// `{"status":"unknown"|"valid"}` or `{"status":"invalid","errors":[...]}`.
    #[schema(value_type = Object)]
    pub validation: ValidationResult,
    /// Whether the validate trigger is offered.
    pub validate_enabled: bool,
}

impl SessionView {
    fn of(session: &EditorSession) -> Self {
        Self {
            text: session.text().to_string(),
            mode: session.mode(),
            validation: session.validation().clone(),
            validate_enabled: session.validate_enabled(),
        }
    }
}

/// Mode switch request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ModeRequest {
    #[schema(value_type = String)]
    pub mode: ViewMode,
}

/// Build the session router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/session", get(get_session))
        .route("/v1/session/text", put(put_text))
        .route("/v1/session/form", get(get_form).post(submit_form))
        .route("/v1/session/mode", put(put_mode))
        .route("/v1/session/upload", post(upload))
        .route("/v1/session/download", get(download))
        .route("/v1/session/validate", post(validate))
}

/// GET /v1/session - Current session state.
#[utoipa::path(
    get,
    path = "/v1/session",
    responses(
        (status = 200, description = "Session state", body = SessionView),
    ),
    tag = "session"
)]
pub(crate) async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(SessionView::of(&state.session.read()))
}

/// PUT /v1/session/text - Code view change: replace the text verbatim.
#[utoipa::path(
    put,
    path = "/v1/session/text",
    request_body(content = String, content_type = "text/plain"),
    responses(
        (status = 200, description = "Text replaced", body = SessionView),
    ),
    tag = "session"
)]
pub(crate) async fn put_text(State(state): State<AppState>, text: String) -> Json<SessionView> {
    let mut session = state.session.write();
    session.set_text(text);
    Json(SessionView::of(&session))
}

/// GET /v1/session/form - Form view input: best-effort parse of the text.
#[utoipa::path(
    get,
    path = "/v1/session/form",
    responses(
        (status = 200, description = "Form snapshot; `{}` when the text does not parse"),
    ),
    tag = "session"
)]
pub(crate) async fn get_form(State(state): State<AppState>) -> Json<Value> {
    Json(state.session.read().form_snapshot())
}

/// POST /v1/session/form - Form view submit: re-serialize into the text.
#[utoipa::path(
    post,
    path = "/v1/session/form",
    request_body(content = String, content_type = "application/json", description = "Edited form object"),
    responses(
        (status = 200, description = "Text replaced by form output", body = SessionView),
        (status = 400, description = "Body is not JSON", body = crate::error::ErrorBody),
    ),
    tag = "session"
)]
pub(crate) async fn submit_form(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SessionView>, AppError> {
    let form = extract_json(body)?;
    let mut session = state.session.write();
    session.set_from_form(&form)?;
    Ok(Json(SessionView::of(&session)))
}

/// PUT /v1/session/mode - Switch between code and form views.
#[utoipa::path(
    put,
    path = "/v1/session/mode",
    request_body = ModeRequest,
    responses(
        (status = 200, description = "Mode switched", body = SessionView),
        (status = 400, description = "Unknown mode", body = crate::error::ErrorBody),
    ),
    tag = "session"
)]
pub(crate) async fn put_mode(
    State(state): State<AppState>,
    body: Result<Json<ModeRequest>, JsonRejection>,
) -> Result<Json<SessionView>, AppError> {
    let req = extract_json(body)?;
    let mut session = state.session.write();
    session.set_mode(req.mode);
    Ok(Json(SessionView::of(&session)))
}

/// POST /v1/session/upload - Load a file's contents as the new text.
///
/// The ticket is taken before the body is read, so an edit or a second
/// upload that lands first wins and this one is reported as superseded.
#[utoipa::path(
    post,
    path = "/v1/session/upload",
    request_body(content = String, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "File contents applied"),
        (status = 400, description = "Upload could not be read", body = crate::error::ErrorBody),
        (status = 409, description = "Overtaken by a newer load or edit", body = crate::error::ErrorBody),
    ),
    tag = "session"
)]
pub(crate) async fn upload(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<LoadOutcome>, AppError> {
    let ticket = state.session.write().begin_load();

    let contents = axum::body::to_bytes(body, state.config.max_upload_bytes)
        .await
        .map(|bytes| decode_document(&bytes))
        .map_err(|e| format!("cannot read upload: {e}"));

    let outcome = state.session.write().complete_load(ticket, contents);
    match outcome {
        LoadOutcome::Applied => Ok(Json(outcome)),
        LoadOutcome::Superseded => Err(AppError::Conflict(
            "upload was overtaken by a newer upload or edit".to_string(),
        )),
        LoadOutcome::Failed(reason) => Err(AppError::BadRequest(reason)),
    }
}

/// GET /v1/session/download - The text as `model.json`, verbatim.
#[utoipa::path(
    get,
    path = "/v1/session/download",
    responses(
        (status = 200, description = "model.json attachment", content_type = "application/json", body = String),
    ),
    tag = "session"
)]
pub(crate) async fn download(State(state): State<AppState>) -> impl IntoResponse {
    let export = state.session.read().download();
    let headers = [
        (header::CONTENT_TYPE, export.content_type.to_string()),
        (header::CONTENT_DISPOSITION, export.content_disposition()),
    ];
    (headers, export.contents)
}

/// POST /v1/session/validate - Parse and check the text against the schema.
#[utoipa::path(
    post,
    path = "/v1/session/validate",
    responses(
        (status = 200, description = "Validation result"),
        (status = 409, description = "Validation unavailable for the current form snapshot", body = crate::error::ErrorBody),
    ),
    tag = "session"
)]
pub(crate) async fn validate(
    State(state): State<AppState>,
) -> Result<Json<ValidationResult>, AppError> {
    let mut session = state.session.write();
    if !session.validate_enabled() {
        return Err(AppError::Conflict(
            "form data is empty; switch to the code view to validate".to_string(),
        ));
    }
    Ok(Json(session.validate().clone()))
}
