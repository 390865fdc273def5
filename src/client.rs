//! Model service boundary.
//!
//! The pipeline only needs "send a prompt pair, get raw text back"; that is
//! [`ModelClient`]. [`GeminiClient`] implements it against the Gemini
//! `generateContent` REST endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ModelSettings;
use crate::error::{CopyError, CopyResult};
use crate::prompt::Prompt;

/// Text generation service.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send one prompt and return the raw text of the first candidate.
    async fn generate(&self, prompt: &Prompt) -> CopyResult<String>;
}

//==============================================================================
// Wire format
//==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
}

/// `generateContent` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    pub fn from_prompt(prompt: &Prompt) -> Self {
        Self {
            system_instruction: Content::text(&prompt.system),
            contents: vec![Content::text(&prompt.user)],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// `generateContent` response body; only the parts the pipeline reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    pub fn into_text(self) -> CopyResult<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| CopyError::Unexpected("model returned no candidate text".to_string()))
    }
}

//==============================================================================
// Gemini client
//==============================================================================

/// Request header carrying the credential.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Single-attempt client for `{endpoint}/models/{model}:generateContent`.
pub struct GeminiClient {
    http: reqwest::Client,
    settings: ModelSettings,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, settings: ModelSettings) -> CopyResult<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(CopyError::Config(
                "an API key is required (--api-key or GEMINI_API_KEY)".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("sitecopy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            settings,
            api_key,
        })
    }

    /// Request URL without the credential.
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, prompt: &Prompt) -> CopyResult<String> {
        let url = self.url();
        info!(model = %self.settings.model, "calling model service");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e.without_url()));
            return Err(CopyError::ExternalService {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.json::<GenerateResponse>().await?.into_text()?;
        debug!(chars = text.len(), "model response received");
        Ok(text)
    }
}
