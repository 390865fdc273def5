//! Orchestrator: reader → prompt → model → recoverer, then export.
//!
//! One generation runs at a time per [`BusyFlag`]. Any stage error aborts
//! the run; there are no partial results.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::client::ModelClient;
use crate::error::{CopyError, CopyResult};
use crate::parser::parse_rows;
use crate::prompt::{compose_for_sheet, compose_for_text, GenerationParams};
use crate::recover::recover_tree;
use crate::tabular::csv_bytes;
use crate::types::{ContentTree, Language};
use crate::writer::{write_fresh, write_overlay};

//==============================================================================
// Busy flag
//==============================================================================

/// Re-entry gate shared by everything that can start a generation.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Claim the flag, or fail with [`CopyError::Busy`]. Released when the
    /// guard drops.
    pub fn try_acquire(&self) -> CopyResult<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CopyError::Busy)?;
        Ok(BusyGuard(Arc::clone(&self.0)))
    }
}

#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

//==============================================================================
// Generation
//==============================================================================

/// What the customer handed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Source {
    /// Rows of a filled-in template.
    Sheet { rows: Vec<Vec<String>> },
    /// Free-form description, optionally with the company's website.
    Text {
        body: String,
        #[serde(default)]
        website_url: Option<String>,
    },
}

/// Result of one generation, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub tree: ContentTree,
    /// Present for sheet sources; selects the overlay writer.
    pub original_rows: Option<Vec<Vec<String>>>,
    pub language: Language,
}

impl Generation {
    /// Output rows: overlay onto the original sheet when there is one,
    /// otherwise a fresh canonical sheet.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        match &self.original_rows {
            Some(original) => write_overlay(original, &self.tree, &self.language),
            None => write_fresh(&self.tree, &self.language),
        }
    }

    /// Output rows as BOM-prefixed CSV.
    pub fn to_csv_bytes(&self) -> CopyResult<Vec<u8>> {
        csv_bytes(&self.to_rows())
    }
}

/// Run one generation against `client`.
///
/// # Errors
/// - [`CopyError::Busy`] if another generation holds `busy`
/// - [`CopyError::EmptyResult`] for sheets without recognized sections
/// - [`CopyError::InvalidInput`] for blank text sources
/// - whatever the client returns, e.g. [`CopyError::ExternalService`]
/// - [`CopyError::MalformedModelOutput`] if the response cannot be repaired
pub async fn run_generation(
    client: &dyn ModelClient,
    busy: &BusyFlag,
    source: Source,
    params: &GenerationParams,
) -> CopyResult<Generation> {
    let _guard = busy.try_acquire()?;

    let result = generate(client, source, params).await;
    if let Err(e) = &result {
        error!(error = %e, "generation aborted");
    }
    result
}

async fn generate(
    client: &dyn ModelClient,
    source: Source,
    params: &GenerationParams,
) -> CopyResult<Generation> {
    let (prompt, original_rows) = match source {
        Source::Sheet { rows } => {
            info!(rows = rows.len(), "parsing sheet");
            let tree = parse_rows(&rows)?;
            (compose_for_sheet(&tree, params)?, Some(rows))
        }
        Source::Text { body, website_url } => {
            info!(chars = body.len(), "composing prompt from text");
            (compose_for_text(&body, website_url.as_deref(), params)?, None)
        }
    };

    info!(language = %params.language, "requesting copy from model");
    let text = client.generate(&prompt).await?;

    let tree = recover_tree(&text).map_err(|e| {
        debug!(raw = %text, "unrecoverable model output");
        e
    })?;
    info!(
        products = tree.products.len(),
        solutions = tree.solutions.len(),
        seo = tree.seo.is_some(),
        "model output recovered"
    );

    Ok(Generation {
        tree,
        original_rows,
        language: params.language.clone(),
    })
}
