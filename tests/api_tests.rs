//! HTTP API tests driven through the router without a socket.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sitecopy::api::{build_router, AppState};
use sitecopy::client::ModelClient;
use sitecopy::config::ModelSettings;
use sitecopy::error::CopyResult;
use sitecopy::prompt::Prompt;
use sitecopy::tabular::UTF8_BOM;
use tower::ServiceExt;

const TEMPLATE: &str = include_str!("fixtures/template.csv");
const MODEL_RESPONSE: &str = include_str!("fixtures/model_response.txt");

struct CannedClient;

#[async_trait]
impl ModelClient for CannedClient {
    async fn generate(&self, _prompt: &Prompt) -> CopyResult<String> {
        Ok(MODEL_RESPONSE.to_string())
    }
}

fn state() -> Arc<AppState> {
    Arc::new(AppState::with_client(Arc::new(CannedClient)))
}

fn app() -> Router {
    build_router(state())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ═══════════════════════════════════════════════════════════════════════════
// INFO ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_health_reports_idle() {
    let (status, body) = get(app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["busy"], false);
    assert_eq!(body["request_id"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let (status, body) = get(app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    let paths: Vec<&str> = body["data"]["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/api/v1/generate"));
    assert!(paths.contains(&"/api/v1/export/csv"));
}

#[tokio::test]
async fn test_version_reports_model() {
    let (_, body) = get(app(), "/version").await;
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["data"]["model"], ModelSettings::default().model);
}

// ═══════════════════════════════════════════════════════════════════════════
// TRANSCODING ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_parse_csv_text() {
    let (status, body) = post(app(), "/api/v1/parse", json!({ "csv": TEMPLATE })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tree"]["hero"]["title"], "山嵐茶業");
    assert_eq!(body["data"]["tree"]["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_parse_inline_rows() {
    let (status, body) = post(
        app(),
        "/api/v1/parse",
        json!({ "rows": [["Hero", "A", "", "", "Welcome"], ["Hero", "B", "", "", "Desc"]] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["tree"],
        json!({"hero": {"title": "Welcome", "description": "Desc"}})
    );
}

#[tokio::test]
async fn test_parse_without_sections_is_bad_request() {
    let (status, body) = post(app(), "/api/v1/parse", json!({ "csv": "Name,Value\nx,y\n" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Hero"));
}

#[tokio::test]
async fn test_parse_without_input_is_bad_request() {
    let (status, _) = post(app(), "/api/v1/parse", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recover_model_text() {
    let (status, body) = post(app(), "/api/v1/recover", json!({ "text": MODEL_RESPONSE })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tree"]["hero"]["title"], "Misty Peak Tea");
}

#[tokio::test]
async fn test_recover_garbage_is_bad_gateway() {
    let (status, body) = post(app(), "/api/v1/recover", json!({ "text": "no json here" })).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_export_fresh_and_overlay() {
    let tree = json!({"hero": {"title": "Hello", "title_zh": "你好"}});

    let (status, fresh) = post(app(), "/api/v1/export", json!({ "tree": tree, "language": "en" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fresh["data"]["layout"], "fresh");
    assert_eq!(fresh["data"]["file_name"], "TourPage_AI_Output.csv");
    assert!(fresh["data"]["csv"].as_str().unwrap().starts_with("區塊名稱"));

    let (status, overlay) = post(
        app(),
        "/api/v1/export",
        json!({ "tree": tree, "language": "en", "original_csv": TEMPLATE }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overlay["data"]["layout"], "overlay");
    assert_eq!(overlay["data"]["rows"][2][5], "Hello");
    assert_eq!(overlay["data"]["rows"][2][6], "你好");
}

#[tokio::test]
async fn test_export_rejects_non_object_tree() {
    let (status, _) = post(app(), "/api/v1/export", json!({ "tree": [1, 2, 3] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_csv_download() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/export/csv")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "tree": {"hero": {"title": "Hi"}} }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("TourPage_AI_Output.csv"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(UTF8_BOM));
}

// ═══════════════════════════════════════════════════════════════════════════
// GENERATION
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_generate_from_sheet() {
    let (status, body) = post(
        app(),
        "/api/v1/generate",
        json!({
            "source": {"mode": "sheet", "rows": [["Hero"], ["", "A", "", "", "山嵐茶業"]]},
            "params": {"language": "ja", "audience": "B2C"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["layout"], "overlay");
    assert_eq!(body["data"]["tree"]["hero"]["title"], "Misty Peak Tea");
    assert_eq!(body["data"]["rows"][1][5], "Misty Peak Tea");
    assert_eq!(body["data"]["rows"][1][6], "山嵐茶業");
}

#[tokio::test]
async fn test_generate_from_text() {
    let (status, body) = post(
        app(),
        "/api/v1/generate",
        json!({ "source": {"mode": "text", "body": "Tea farm in Alishan"} }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["layout"], "fresh");
    assert_eq!(body["data"]["rows"][0][0], "區塊名稱");
}

#[tokio::test]
async fn test_generate_while_busy_is_conflict() {
    let state = state();
    let _held = state.busy.try_acquire().unwrap();

    let (status, body) = post(
        build_router(Arc::clone(&state)),
        "/api/v1/generate",
        json!({ "source": {"mode": "text", "body": "Tea"} }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (_, health) = get(build_router(state), "/health").await;
    assert_eq!(health["data"]["busy"], true);
}

#[tokio::test]
async fn test_generate_without_credential_is_rejected() {
    let app = build_router(Arc::new(AppState::new(ModelSettings::default(), None)));

    let (status, body) = post(
        app,
        "/api/v1/generate",
        json!({ "source": {"mode": "text", "body": "Tea"} }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("API key"));
}
