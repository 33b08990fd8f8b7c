//! # Integration Tests for mme-api
//!
//! Drives the router the way the page does: code edits, form submits,
//! mode switches, uploads, downloads and validation.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use mme_api::state::{AppConfig, AppState};
use mme_schema::ModelSchema;

/// Schema requiring a string property `a`.
fn string_a_schema() -> Arc<ModelSchema> {
    Arc::new(
        ModelSchema::from_value(
            "a.schema.json",
            json!({
                "type": "object",
                "required": ["a"],
                "properties": { "a": { "type": "string" } }
            }),
        )
        .unwrap(),
    )
}

fn test_state() -> AppState {
    AppState::with_schema(AppConfig::default(), string_a_schema())
}

fn test_app() -> axum::Router {
    mme_api::app(test_state())
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put_text(text: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/v1/session/text")
        .header("content-type", "text/plain")
        .body(Body::from(text.to_string()))
        .unwrap()
}

fn post_validate() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/session/validate")
        .body(Body::empty())
        .unwrap()
}

fn put_mode(mode: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/v1/session/mode")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "mode": mode }).to_string()))
        .unwrap()
}

fn upload(contents: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/session/upload")
        .header("content-type", "application/octet-stream")
        .body(contents.into())
        .unwrap()
}

// -- Health Probes & Page -----------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn test_index_page_has_controls() {
    let response = test_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    for control in ["Code Editor", "Form Editor", "Download JSON", "Validate Against Schema"] {
        assert!(html.contains(control), "page is missing {control}");
    }
}

#[tokio::test]
async fn test_index_page_sends_one_text_edit_at_a_time() {
    let html = body_string(test_app().oneshot(get("/")).await.unwrap()).await;
    assert_eq!(html.matches("\"/v1/session/text\"").count(), 1);
    assert!(html.contains("pushText(area.value)"));
    assert!(html.contains("await flushText();"));
}

#[tokio::test]
async fn test_openapi_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/v1/session/validate"].is_object());
}

// -- Schema -------------------------------------------------------------------

#[tokio::test]
async fn test_schema_endpoint_serves_active_schema() {
    let response = test_app().oneshot(get("/v1/schema")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let schema = body_json(response).await;
    assert_eq!(schema["required"], json!(["a"]));
}

#[tokio::test]
async fn test_bundled_schema_served_by_default() {
    let state = AppState::from_config(AppConfig::default()).unwrap();
    let response = mme_api::app(state).oneshot(get("/v1/schema")).await.unwrap();
    let schema = body_json(response).await;
    assert_eq!(schema["title"], "FHIRConnect Model Mapping");
}

// -- Session ------------------------------------------------------------------

#[tokio::test]
async fn test_initial_session() {
    let response = test_app().oneshot(get("/v1/session")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(
        view,
        json!({
            "text": "{}",
            "mode": "code",
            "validation": { "status": "unknown" },
            "validate_enabled": true
        })
    );
}

#[tokio::test]
async fn test_validate_wrong_type_reports_path() {
    let app = test_app();
    app.clone().oneshot(put_text(r#"{"a":1}"#)).await.unwrap();

    let response = app.oneshot(post_validate()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let result = body_json(response).await;
    assert_eq!(result["status"], "invalid");
    let errors = result["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().starts_with("/a "));
}

#[tokio::test]
async fn test_validate_not_json_single_message() {
    let app = test_app();
    app.clone().oneshot(put_text("not json")).await.unwrap();

    let result = body_json(app.oneshot(post_validate()).await.unwrap()).await;
    let expected = serde_json::from_str::<Value>("not json").unwrap_err().to_string();
    assert_eq!(result, json!({ "status": "invalid", "errors": [expected] }));
}

#[tokio::test]
async fn test_validate_then_edit_resets_result() {
    let app = test_app();
    app.clone().oneshot(put_text(r#"{"a":"x"}"#)).await.unwrap();

    let result = body_json(app.clone().oneshot(post_validate()).await.unwrap()).await;
    assert_eq!(result, json!({ "status": "valid" }));

    let view = body_json(app.clone().oneshot(put_text(r#"{"a":"y"}"#)).await.unwrap()).await;
    assert_eq!(view["validation"], json!({ "status": "unknown" }));
}

#[tokio::test]
async fn test_text_edits_apply_in_request_order() {
    let state = test_state();
    let app = mme_api::app(state.clone());
    for text in [r#"{"a":"a"}"#, r#"{"a":"ab"}"#, r#"{"a":"abc"}"#] {
        let response = app.clone().oneshot(put_text(text)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(state.session.read().text(), r#"{"a":"abc"}"#);

    let response = app.oneshot(get("/v1/session/download")).await.unwrap();
    assert_eq!(body_string(response).await, r#"{"a":"abc"}"#);
}

#[tokio::test]
async fn test_download_is_verbatim_model_json() {
    let app = test_app();
    app.clone().oneshot(put_text(r#"{"x":2}"#)).await.unwrap();

    let response = app.oneshot(get("/v1/session/download")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"model.json\""
    );
    assert_eq!(body_string(response).await, r#"{"x":2}"#);
}

#[tokio::test]
async fn test_download_exports_invalid_json_unchanged() {
    let app = test_app();
    app.clone().oneshot(put_text("{ half")).await.unwrap();
    let response = app.oneshot(get("/v1/session/download")).await.unwrap();
    assert_eq!(body_string(response).await, "{ half");
}

// -- Upload -------------------------------------------------------------------

#[tokio::test]
async fn test_upload_replaces_text_and_resets_result() {
    let state = test_state();
    let app = mme_api::app(state.clone());
    app.clone().oneshot(put_text(r#"{"a":"x"}"#)).await.unwrap();
    app.clone().oneshot(post_validate()).await.unwrap();
    assert!(state.session.read().validation().is_valid());

    let response = app.oneshot(upload("{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "outcome": "applied" }));

    let session = state.session.read();
    assert_eq!(session.text(), "{}");
    assert!(session.validation().is_unknown());
}

#[tokio::test]
async fn test_upload_invalid_utf8_is_replaced() {
    let state = test_state();
    let app = mme_api::app(state.clone());
    let response = app.oneshot(upload(vec![b'"', 0xff, b'"'])).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.session.read().text(), "\"\u{fffd}\"");
}

#[tokio::test]
async fn test_upload_over_limit_leaves_state() {
    let config = AppConfig {
        max_upload_bytes: 4,
        ..AppConfig::default()
    };
    let state = AppState::with_schema(config, string_a_schema());
    let app = mme_api::app(state.clone());

    let response = app.oneshot(upload(r#"{"a":"too long"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(state.session.read().text(), "{}");
}

#[tokio::test]
async fn test_large_upload_can_be_edited() {
    let state = test_state();
    let app = mme_api::app(state.clone());
    let large = format!(r#"{{"a":"{}"}}"#, "x".repeat(3 * 1024 * 1024));

    let response = app.clone().oneshot(upload(large.clone())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let edited = large.replacen('x', "y", 1);
    let response = app.clone().oneshot(put_text(&edited)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.session.read().text(), edited);

    let form = json!({ "a": "z".repeat(3 * 1024 * 1024) });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/session/form")
                .header("content-type", "application/json")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.session.read().form_snapshot(), form);
}

#[tokio::test]
async fn test_upload_superseded_by_edit_is_conflict() {
    let state = test_state();
    let app = mme_api::app(state.clone());

    let (tx, rx) = futures::channel::mpsc::unbounded::<Result<Bytes, std::io::Error>>();
    tx.unbounded_send(Ok(Bytes::from_static(b"{\"slow\":"))).unwrap();
    let pending = tokio::spawn(app.clone().oneshot(upload(Body::from_stream(rx))));
    // Let the upload take its ticket and park on the unfinished body.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let response = app.oneshot(put_text(r#"{"typed":1}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    tx.unbounded_send(Ok(Bytes::from_static(b"1}"))).unwrap();
    drop(tx);

    let response = pending.await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(state.session.read().text(), r#"{"typed":1}"#);
}

// -- Form View ----------------------------------------------------------------

#[tokio::test]
async fn test_form_snapshot_falls_back_to_empty_object() {
    let app = test_app();
    app.clone().oneshot(put_text("not json")).await.unwrap();
    let snapshot = body_json(app.oneshot(get("/v1/session/form")).await.unwrap()).await;
    assert_eq!(snapshot, json!({}));
}

#[tokio::test]
async fn test_form_submit_round_trips() {
    let app = test_app();
    let form = json!({ "a": "x", "nested": { "list": [1, 2, 3] } });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/session/form")
                .header("content-type", "application/json")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["validation"], json!({ "status": "unknown" }));
    let text = view["text"].as_str().unwrap();
    assert!(text.contains("\n  \"a\": \"x\""));
    assert_eq!(serde_json::from_str::<Value>(text).unwrap(), form);

    let snapshot = body_json(app.oneshot(get("/v1/session/form")).await.unwrap()).await;
    assert_eq!(snapshot, form);
}

#[tokio::test]
async fn test_form_submit_rejects_non_json() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/session/form")
                .header("content-type", "application/json")
                .body(Body::from("{ nope"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Mode ---------------------------------------------------------------------

#[tokio::test]
async fn test_mode_switch_keeps_text_and_result() {
    let app = test_app();
    app.clone().oneshot(put_text(r#"{"a":"x"}"#)).await.unwrap();
    app.clone().oneshot(post_validate()).await.unwrap();

    let response = app.oneshot(put_mode("form")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["mode"], "form");
    assert_eq!(view["text"], r#"{"a":"x"}"#);
    assert_eq!(view["validation"], json!({ "status": "valid" }));
}

#[tokio::test]
async fn test_unknown_mode_rejected() {
    let response = test_app().oneshot(put_mode("table")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_unavailable_for_falsy_form_snapshot() {
    let app = test_app();
    app.clone().oneshot(put_text("null")).await.unwrap();
    let view = body_json(app.clone().oneshot(put_mode("form")).await.unwrap()).await;
    assert_eq!(view["validate_enabled"], false);

    let response = app.clone().oneshot(post_validate()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    app.clone().oneshot(put_mode("code")).await.unwrap();
    let response = app.oneshot(post_validate()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
