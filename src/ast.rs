//! # PromQL Abstract Syntax Tree
//!
//! The tree the formatter consumes. It is produced elsewhere, usually by
//! Prometheus itself through `/api/v1/parse_query`, and every type here
//! deserializes from that JSON shape.
//!
//! ## Layout
//!
//! - **[expressions]** - the [`Expr`] node enum and its composite nodes
//! - **[selectors]** - vector/matrix selectors, label matchers, `@` anchors
//! - **[matching]** - `on`/`ignoring` and `group_left`/`group_right`
//! - **[operators]** - binary and unary operators with their precedence
//!
//! ## Example
//!
//! ```
//! use promql_fmt::ast::Expr;
//!
//! let json = r#"{
//!   "type": "call",
//!   "func": {"name": "rate"},
//!   "args": [{
//!     "type": "matrixSelector",
//!     "name": "http_requests_total",
//!     "matchers": [{"type": "=", "name": "__name__", "value": "http_requests_total"}],
//!     "range": 300000,
//!     "offset": 0,
//!     "timestamp": null,
//!     "startOrEnd": null
//!   }]
//! }"#;
//!
//! let expr: Expr = serde_json::from_str(json).unwrap();
//! assert_eq!(expr.kind(), "call");
//! ```
//!
//! ## Durations and times
//!
//! All ranges, steps, offsets and timestamps are milliseconds. Ranges and
//! steps cannot be negative. Offsets can.
pub mod expressions;
pub mod matching;
pub mod operators;
pub mod selectors;

pub use expressions::{
    Aggregation, BinaryExpr, Call, Expr, Function, NumberLiteral, ParenExpr, Placeholder,
    StringLiteral, Subquery, UnaryExpr, format_number,
};
pub use matching::{Cardinality, VectorMatching};
pub use operators::{BinaryOp, UNARY_PRECEDENCE, UnaryOp};
pub use selectors::{
    METRIC_NAME_LABEL, MatchType, Matcher, MatrixSelector, StartOrEnd, VectorSelector,
};

use serde::{Deserialize, Deserializer};

/// Go encodes a nil slice as `null`; read it as empty.
pub(crate) fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
