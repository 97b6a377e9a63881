pub mod ast;
pub mod cli;
pub mod duration;
pub mod escape;
pub mod format;
pub mod fragment;
pub mod output;
pub mod parens;

pub use ast::{BinaryOp, Expr, Matcher, VectorMatching};
pub use duration::{DurationError, format_duration, parse_duration};
pub use escape::{EscapeError, escape_string, unescape_string};
pub use format::{FormatError, RenderOptions, render, render_with};
pub use fragment::{Fragment, Span, SpanKind};
pub use output::{Theme, to_ansi, to_html, to_plain};
pub use parens::{Side, needs_parens};
