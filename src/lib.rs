//! sitecopy - spreadsheet ⇄ website copy transcoder
//!
//! This library turns a filled-in website copy template into a nested
//! content tree, recovers the tree a language model sends back, and projects
//! that tree into a spreadsheet again.
//!
//! # Features
//!
//! - Section/item-code template reader (`Hero`, `About Us`, `carousel`, `Contact Us`)
//! - Best-effort JSON recovery for model output (fences, prose, trailing commas, bare keys)
//! - Overlay export onto the customer's sheet, or a fresh canonical sheet
//! - Bilingual output with a Chinese translation column for non-Chinese targets
//! - SEO analysis and Schema.org sections appended to every export
//! - CSV (UTF-8 BOM) and XLSX files
//!
//! # Example
//!
//! ```
//! use sitecopy::parser::parse_rows;
//! use sitecopy::recover::recover_tree;
//! use sitecopy::types::Language;
//! use sitecopy::writer::write_overlay;
//!
//! let rows: Vec<Vec<String>> = vec![
//!     vec!["Hero".into()],
//!     vec!["".into(), "A".into(), "".into(), "".into(), "Old title".into()],
//! ];
//! let input = parse_rows(&rows)?;
//! assert_eq!(input.hero.unwrap().title.as_deref(), Some("Old title"));
//!
//! let reply = "Here you go:\n{\"hero\": {\"title\": \"New title\",}}";
//! let tree = recover_tree(reply)?;
//!
//! let output = write_overlay(&rows, &tree, &Language::new("zh-TW"));
//! assert_eq!(output[1][5], "New title");
//! # Ok::<(), sitecopy::error::CopyError>(())
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod layout;
pub mod lenient;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod recover;
pub mod tabular;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{CopyError, CopyResult};
pub use pipeline::{run_generation, BusyFlag, Generation, Source};
pub use prompt::GenerationParams;
pub use types::{ContentTree, Language};
