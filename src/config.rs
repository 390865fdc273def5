//! Settings that come from files or the environment rather than the sheet.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CopyError, CopyResult};
use crate::prompt::GenerationParams;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// File name used when the caller does not pick one.
pub const DEFAULT_EXPORT_NAME: &str = "TourPage_AI_Output.csv";

/// Where the model service lives. Never holds the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub endpoint: String,
    pub model: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ModelSettings {
    /// Defaults with optional overrides; blank overrides are ignored.
    pub fn with_overrides(endpoint: Option<&str>, model: Option<&str>) -> Self {
        let mut settings = Self::default();
        if let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            settings.endpoint = endpoint.to_string();
        }
        if let Some(model) = model.map(str::trim).filter(|m| !m.is_empty()) {
            settings.model = model.to_string();
        }
        settings
    }
}

/// Load generation parameters from a YAML brief. Missing keys take their
/// defaults.
///
/// ```yaml
/// audience: B2B
/// language: en
/// focus: usp
/// keywords: "Since 1987"
/// competitor_urls:
///   - https://rival.example
/// ```
pub fn load_brief(path: &Path) -> CopyResult<GenerationParams> {
    let content = fs::read_to_string(path).map_err(|e| {
        CopyError::Config(format!("cannot read brief {}: {}", path.display(), e))
    })?;
    let params: GenerationParams = if content.trim().is_empty() {
        GenerationParams::default()
    } else {
        serde_yaml::from_str(&content)?
    };
    debug!(path = %path.display(), language = %params.language, "brief loaded");
    Ok(params)
}
