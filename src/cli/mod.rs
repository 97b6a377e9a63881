//! CLI support for promql-fmt
//!
//! Provides programmatic access to the `promql-fmt` commands so that other
//! tools can embed them without spawning the binary.

mod convert;
mod render;

pub use convert::parse_ast;
pub use render::{OutputFormat, RenderCommand, execute_render};

use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// The tree could not be rendered
    #[error("Render error: {0}")]
    Format(#[from] crate::format::FormatError),
    /// Bad duration argument
    #[error("Duration error: {0}")]
    Duration(#[from] crate::duration::DurationError),
    /// Input was not a valid AST document
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The parse endpoint reported a failure instead of returning a tree
    #[error("Query API error ({error_type}): {message}")]
    Api { error_type: String, message: String },
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No input provided
    #[error("No input provided. Pass a file, use --input, or pipe JSON to stdin.")]
    NoInput,
}
