//! API request handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::client::{GeminiClient, ModelClient};
use crate::config::DEFAULT_EXPORT_NAME;
use crate::error::{CopyError, CopyResult};
use crate::parser::parse_rows;
use crate::pipeline::{run_generation, Generation, Source};
use crate::prompt::GenerationParams;
use crate::recover::recover_tree;
use crate::tabular::{csv_bytes, rows_from_csv, UTF8_BOM};
use crate::types::{ContentTree, Language};

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

fn reply<T: Serialize>(result: CopyResult<T>) -> Reply<T> {
    match result {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))),
        Err(e) => {
            warn!(error = %e, "request failed");
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ApiResponse::err(e.user_message())))
        }
    }
}

/// Rows from either inline rows or CSV text.
fn input_rows(rows: Option<Vec<Vec<String>>>, csv: Option<&str>) -> CopyResult<Option<Vec<Vec<String>>>> {
    match (rows, csv) {
        (Some(rows), _) => Ok(Some(rows)),
        (None, Some(text)) => rows_from_csv(text.as_bytes()).map(Some),
        (None, None) => Ok(None),
    }
}

//==============================================================================
// Info endpoints
//==============================================================================

/// Root endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

fn endpoint(method: &str, path: &str, description: &str) -> EndpointInfo {
    EndpointInfo {
        path: path.to_string(),
        method: method.to_string(),
        description: description.to_string(),
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(RootResponse {
        name: "sitecopy API Server".to_string(),
        version: state.version.clone(),
        description: "Website copy and SEO generation from spreadsheet templates".to_string(),
        endpoints: vec![
            endpoint("GET", "/health", "Health check endpoint"),
            endpoint("GET", "/version", "Get server version"),
            endpoint("POST", "/api/v1/parse", "Parse template rows or CSV text into a content tree"),
            endpoint("POST", "/api/v1/recover", "Repair raw model output into a content tree"),
            endpoint("POST", "/api/v1/export", "Project a content tree into output rows"),
            endpoint("POST", "/api/v1/export/csv", "Download output rows as a CSV file"),
            endpoint("POST", "/api/v1/generate", "Run a full generation against the model"),
        ],
    }))
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub busy: bool,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        busy: state.busy.is_busy(),
    }))
}

/// Version response
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub model: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        model: state.settings.model.clone(),
        features: ["parse", "recover", "export", "generate"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
    }))
}

//==============================================================================
// Transcoding endpoints
//==============================================================================

/// Parse request: inline rows take precedence over CSV text.
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub rows: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub csv: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TreeResponse {
    pub tree: ContentTree,
}

fn parse_request(req: ParseRequest) -> CopyResult<TreeResponse> {
    let rows = input_rows(req.rows, req.csv.as_deref())?
        .ok_or_else(|| CopyError::InvalidInput("either rows or csv is required".to_string()))?;
    Ok(TreeResponse {
        tree: parse_rows(&rows)?,
    })
}

/// POST /api/v1/parse - Template rows → content tree
pub async fn parse(Json(req): Json<ParseRequest>) -> Reply<TreeResponse> {
    reply(parse_request(req))
}

#[derive(Debug, Deserialize)]
pub struct RecoverRequest {
    pub text: String,
}

/// POST /api/v1/recover - Raw model output → content tree
pub async fn recover(Json(req): Json<RecoverRequest>) -> Reply<TreeResponse> {
    reply(recover_tree(&req.text).map(|tree| TreeResponse { tree }))
}

/// Export request. The tree is taken as loose JSON so partial trees work.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub tree: Value,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub original_rows: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub original_csv: Option<String>,
}

impl ExportRequest {
    fn into_generation(self) -> CopyResult<Generation> {
        if !self.tree.is_object() {
            return Err(CopyError::InvalidInput("tree must be a JSON object".to_string()));
        }
        Ok(Generation {
            tree: ContentTree::from_value(self.tree)?,
            original_rows: input_rows(self.original_rows, self.original_csv.as_deref())?,
            language: self.language.map(Language::new).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResponse {
    /// `overlay` or `fresh`.
    pub layout: String,
    pub file_name: String,
    pub rows: Vec<Vec<String>>,
    /// CSV text without the byte-order mark.
    pub csv: String,
}

fn export_response(generation: &Generation) -> CopyResult<ExportResponse> {
    let rows = generation.to_rows();
    let bytes = csv_bytes(&rows)?;
    let csv = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec())
        .map_err(|e| CopyError::Unexpected(format!("CSV is not UTF-8: {}", e)))?;

    Ok(ExportResponse {
        layout: if generation.original_rows.is_some() { "overlay" } else { "fresh" }.to_string(),
        file_name: DEFAULT_EXPORT_NAME.to_string(),
        rows,
        csv,
    })
}

/// POST /api/v1/export - Content tree → output rows + CSV text
pub async fn export(Json(req): Json<ExportRequest>) -> Reply<ExportResponse> {
    reply(req.into_generation().and_then(|g| export_response(&g)))
}

/// POST /api/v1/export/csv - Content tree → CSV download (with BOM)
pub async fn export_csv(Json(req): Json<ExportRequest>) -> Response {
    match req.into_generation().and_then(|g| g.to_csv_bytes()) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", DEFAULT_EXPORT_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => reply::<()>(Err(e)).into_response(),
    }
}

//==============================================================================
// Generation
//==============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Falls back to the server's key when absent.
    #[serde(default)]
    pub api_key: Option<String>,
    pub source: Source,
    #[serde(default)]
    pub params: GenerationParams,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub tree: ContentTree,
    #[serde(flatten)]
    pub export: ExportResponse,
}

fn client_for(state: &AppState, api_key: Option<String>) -> CopyResult<Arc<dyn ModelClient>> {
    if let Some(client) = &state.client {
        return Ok(Arc::clone(client));
    }
    let key = api_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| state.api_key.clone())
        .unwrap_or_default();
    Ok(Arc::new(GeminiClient::new(key, state.settings.clone())?))
}

async fn generate_request(state: &AppState, req: GenerateRequest) -> CopyResult<GenerateResponse> {
    let client = client_for(state, req.api_key)?;
    let generation = run_generation(client.as_ref(), &state.busy, req.source, &req.params).await?;
    let export = export_response(&generation)?;
    info!(layout = %export.layout, rows = export.rows.len(), "generation served");
    Ok(GenerateResponse {
        tree: generation.tree,
        export,
    })
}

/// POST /api/v1/generate - Full pipeline; 409 while another run is active
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Reply<GenerateResponse> {
    reply(generate_request(&state, req).await)
}
