//! Turning a rendered [`Fragment`] into text for a particular display.
//!
//! This module provides printers that bind each [`SpanKind`] to a style:
//!
//! - **Plain output** via [`to_plain()`] - the bare expression text
//! - **Terminal output** via [`to_ansi()`] - SGR colour escapes per span kind
//! - **HTML output** via [`to_html()`] - `<span>` elements with a class per kind
//!   and the colours of the chosen [`Theme`]
//!
//! # Examples
//!
//! ```
//! use promql_fmt::ast::{Expr, VectorSelector};
//! use promql_fmt::format::render;
//! use promql_fmt::output::{to_html, to_plain, Theme};
//!
//! let expr: Expr = VectorSelector::new("up").with_offset(300_000).into();
//! let fragment = render(&expr, true, None).unwrap();
//!
//! assert_eq!(to_plain(&fragment), "up offset 5m");
//! assert!(to_html(&fragment, Theme::Dark).contains(r#"<span class="promql-keyword" style="color:#14bfad">offset</span>"#));
//! ```

use crate::fragment::{Fragment, SpanKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Plain,
    Ansi,
    Html,
}

/// Colour palette for HTML output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// CSS colour for a span kind; plain text keeps the surrounding colour.
    pub fn color(&self, kind: SpanKind) -> Option<&'static str> {
        let dark = *self == Theme::Dark;
        let color = match kind {
            SpanKind::Text => return None,
            SpanKind::Keyword if dark => "#14bfad",
            SpanKind::Keyword => "#008080",
            SpanKind::LabelName if dark => "#ff8585",
            SpanKind::LabelName => "#800000",
            SpanKind::String if dark => "#fca5a5",
            SpanKind::String => "#a31515",
            SpanKind::Duration | SpanKind::Number if dark => "#22c55e",
            SpanKind::Duration | SpanKind::Number => "#09885a",
            SpanKind::Ellipsis => "#aaaaaa",
        };
        Some(color)
    }
}

const MONOSPACE_FONT: &str = "font-family:&quot;DejaVu Sans Mono&quot;, monospace";

pub struct FragmentPrinter {
    style: OutputStyle,
    theme: Theme,
}

impl FragmentPrinter {
    pub fn new(style: OutputStyle, theme: Theme) -> Self {
        FragmentPrinter { style, theme }
    }

    pub fn print(&self, fragment: &Fragment) -> String {
        let mut out = String::new();
        if self.style == OutputStyle::Html {
            out.push_str(&format!(r#"<span class="promql-code" style="{MONOSPACE_FONT}">"#));
        }
        self.print_fragment(fragment, &mut out);
        if self.style == OutputStyle::Html {
            out.push_str("</span>");
        }
        out
    }

    fn print_fragment(&self, fragment: &Fragment, out: &mut String) {
        match fragment {
            Fragment::Span(span) => match self.style {
                OutputStyle::Plain => out.push_str(&span.text),
                OutputStyle::Ansi => self.print_ansi(span.kind, &span.text, out),
                OutputStyle::Html => self.print_html(span.kind, &span.text, out),
            },
            Fragment::Node(children) => {
                for child in children {
                    self.print_fragment(child, out);
                }
            }
        }
    }

    fn print_ansi(&self, kind: SpanKind, text: &str, out: &mut String) {
        let code = match kind {
            SpanKind::Text => {
                out.push_str(text);
                return;
            }
            SpanKind::Keyword => "36",
            SpanKind::LabelName => "31",
            SpanKind::String => "91",
            SpanKind::Duration | SpanKind::Number => "32",
            SpanKind::Ellipsis => "90",
        };
        out.push_str(&format!("\x1b[{code}m{text}\x1b[0m"));
    }

    fn print_html(&self, kind: SpanKind, text: &str, out: &mut String) {
        let text = self.escape_html(text);
        match self.theme.color(kind) {
            None => out.push_str(&text),
            Some(color) => out.push_str(&format!(
                r#"<span class="promql-{}" style="color:{}">{}</span>"#,
                kind.as_str(),
                color,
                text
            )),
        }
    }

    fn escape_html(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '&' => "&amp;".chars().collect::<Vec<_>>(),
                '<' => "&lt;".chars().collect(),
                '>' => "&gt;".chars().collect(),
                '"' => "&quot;".chars().collect(),
                '\'' => "&#39;".chars().collect(),
                c => vec![c],
            })
            .collect()
    }
}

// Convenience functions

/// The expression as plain query text, without any styling.
pub fn to_plain(fragment: &Fragment) -> String {
    FragmentPrinter::new(OutputStyle::Plain, Theme::default()).print(fragment)
}

/// The expression with ANSI colour escapes, for terminals.
pub fn to_ansi(fragment: &Fragment) -> String {
    FragmentPrinter::new(OutputStyle::Ansi, Theme::default()).print(fragment)
}

/// The expression as an HTML snippet coloured for `theme`.
///
/// The output is a single `<span class="promql-code">` element. Styled
/// spans carry a `promql-<kind>` class and an inline colour, and all text
/// is HTML-escaped.
pub fn to_html(fragment: &Fragment, theme: Theme) -> String {
    FragmentPrinter::new(OutputStyle::Html, theme).print(fragment)
}
