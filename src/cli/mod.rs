//! CLI command handlers

pub mod commands;

pub use commands::{export, generate, languages, parse, recover, GenerateArgs};
