//! Styled text produced by the formatter.
//!
//! A [`Fragment`] is a small markup tree: leaves are [`Span`]s carrying a
//! [`SpanKind`] and their text, inner nodes group the output of one AST node.
//! Display layers decide how each kind looks (see [`crate::output`]).

use serde::Serialize;
use std::fmt;

/// Text shown where rendering was cut short.
pub const ELLIPSIS: &str = "…";

/// What a span of text is, for styling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanKind {
    /// Punctuation, metric names, operators
    Text,
    /// `sum`, `by`, `offset`, function names, word operators
    Keyword,
    LabelName,
    /// Quoted string, quotes included
    String,
    Duration,
    Number,
    Ellipsis,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Text => "text",
            SpanKind::Keyword => "keyword",
            SpanKind::LabelName => "label-name",
            SpanKind::String => "string",
            SpanKind::Duration => "duration",
            SpanKind::Number => "number",
            SpanKind::Ellipsis => "ellipsis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Span {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Fragment {
    Span(Span),
    Node(Vec<Fragment>),
}

impl Fragment {
    pub fn span(kind: SpanKind, text: impl Into<String>) -> Self {
        Fragment::Span(Span::new(kind, text))
    }

    pub fn ellipsis() -> Self {
        Fragment::span(SpanKind::Ellipsis, ELLIPSIS)
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, Fragment::Span(Span { kind: SpanKind::Ellipsis, .. }))
    }

    /// All spans, depth first, in output order.
    pub fn spans(&self) -> Vec<&Span> {
        let mut out = Vec::new();
        self.collect_spans(&mut out);
        out
    }

    fn collect_spans<'a>(&'a self, out: &mut Vec<&'a Span>) {
        match self {
            Fragment::Span(span) => out.push(span),
            Fragment::Node(children) => {
                for child in children {
                    child.collect_spans(out);
                }
            }
        }
    }

    /// Texts of all spans of `kind`, in output order.
    pub fn texts_of(&self, kind: SpanKind) -> Vec<&str> {
        self.spans()
            .into_iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.text.as_str())
            .collect()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Span(span) => f.write_str(&span.text),
            Fragment::Node(children) => children.iter().try_for_each(|c| write!(f, "{c}")),
        }
    }
}

/// Accumulates the children of one [`Fragment::Node`].
#[derive(Debug, Default)]
pub(crate) struct FragmentBuilder {
    parts: Vec<Fragment>,
}

impl FragmentBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, kind: SpanKind, text: impl Into<String>) -> &mut Self {
        self.parts.push(Fragment::span(kind, text));
        self
    }

    pub(crate) fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(SpanKind::Text, text)
    }

    pub(crate) fn keyword(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(SpanKind::Keyword, text)
    }

    pub(crate) fn child(&mut self, fragment: Fragment) -> &mut Self {
        self.parts.push(fragment);
        self
    }

    /// `(a, b, c)` where each name is a label-name span.
    pub(crate) fn label_list(&mut self, labels: &[String]) -> &mut Self {
        self.text("(");
        for (i, label) in labels.iter().enumerate() {
            if i != 0 {
                self.text(", ");
            }
            self.push(SpanKind::LabelName, label.as_str());
        }
        self.text(")")
    }

    pub(crate) fn finish(self) -> Fragment {
        Fragment::Node(self.parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_concatenates_nested_text() {
        let fragment = Fragment::Node(vec![
            Fragment::span(SpanKind::Keyword, "sum"),
            Fragment::Node(vec![
                Fragment::span(SpanKind::Text, "("),
                Fragment::ellipsis(),
                Fragment::span(SpanKind::Text, ")"),
            ]),
        ]);
        assert_eq!(fragment.to_string(), "sum(…)");
        assert_eq!(fragment.spans().len(), 4);
        assert_eq!(fragment.texts_of(SpanKind::Keyword), vec!["sum"]);
    }

    #[test]
    fn serializes_spans_as_objects_and_nodes_as_arrays() {
        let mut builder = FragmentBuilder::new();
        builder.keyword("by").label_list(&["job".to_string()]);
        let json = serde_json::to_value(builder.finish()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"kind": "keyword", "text": "by"},
                {"kind": "text", "text": "("},
                {"kind": "labelName", "text": "job"},
                {"kind": "text", "text": ")"}
            ])
        );
    }
}
