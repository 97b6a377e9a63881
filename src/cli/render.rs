//! Render AST documents to text

use tracing::debug;

use super::{CliError, parse_ast};
use crate::{
    format::{RenderOptions, render_with},
    output::{FragmentPrinter, OutputStyle, Theme},
};

/// How the rendered expression is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Bare query text
    #[default]
    Plain,
    /// Query text with terminal colours
    Ansi,
    /// HTML snippet
    Html,
    /// The fragment tree as JSON
    Json,
}

/// Options for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderCommand {
    /// AST document, bare or wrapped in an API response
    pub input: Option<String>,
    pub format: OutputFormat,
    pub theme: Theme,
    pub options: RenderOptions,
}

/// Execute a render operation, returning what should be printed
pub fn execute_render(command: &RenderCommand) -> Result<String, CliError> {
    let json = command.input.as_ref().ok_or(CliError::NoInput)?;
    let expr = parse_ast(json)?;
    debug!(
        kind = expr.kind(),
        format = ?command.format,
        max_depth = ?command.options.max_depth,
        "rendering AST"
    );

    let fragment = render_with(&expr, &command.options)?;

    let style = match command.format {
        OutputFormat::Json => return Ok(serde_json::to_string(&fragment)?),
        OutputFormat::Plain => OutputStyle::Plain,
        OutputFormat::Ansi => OutputStyle::Ansi,
        OutputFormat::Html => OutputStyle::Html,
    };
    Ok(FragmentPrinter::new(style, command.theme).print(&fragment))
}
