//! Reading AST documents as produced by Prometheus

use serde::Deserialize;

use super::CliError;
use crate::ast::Expr;

/// Response body of `/api/v1/parse_query`.
#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ApiResponse {
    Success {
        data: Expr,
    },
    Error {
        #[serde(rename = "errorType", default)]
        error_type: String,
        #[serde(default)]
        error: String,
    },
}

/// Parse an AST from JSON.
///
/// Accepts either a bare node (`{"type": "vectorSelector", ...}`) or the
/// full API response (`{"status": "success", "data": {...}}`). An error
/// response becomes [`CliError::Api`].
pub fn parse_ast(json: &str) -> Result<Expr, CliError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    if value.get("status").is_none() {
        return Ok(serde_json::from_value(value)?);
    }

    match serde_json::from_value(value)? {
        ApiResponse::Success { data } => Ok(data),
        ApiResponse::Error { error_type, error } => Err(CliError::Api {
            error_type,
            message: error,
        }),
    }
}
