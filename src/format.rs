//! Rendering a PromQL AST into a highlighted [`Fragment`].
//!
//! The formatter walks the tree once and builds one [`Fragment::Node`] per
//! AST node. Two knobs control how much is shown:
//!
//! - `show_children: false` prints a node's own decorations (operator
//!   keywords, grouping labels, matchers, durations) without descending into
//!   its sub-expressions. Tree views use this to label each node.
//! - `max_depth` cuts the walk off: a node reached with a budget of `0`
//!   renders as a single `…`. `None` never truncates.
//!
//! ```
//! use promql_fmt::ast::{Aggregation, Expr, VectorSelector};
//! use promql_fmt::format::render;
//!
//! let expr: Expr = Aggregation::new("sum", VectorSelector::new("up").into())
//!     .by(&["job"])
//!     .into();
//!
//! assert_eq!(render(&expr, true, None).unwrap().to_string(), "sum by(job) (up)");
//! assert_eq!(render(&expr, false, None).unwrap().to_string(), "sum by(job) ");
//! assert_eq!(render(&expr, true, Some(1)).unwrap().to_string(), "sum by(job) (…)");
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{
        Aggregation, BinaryExpr, BinaryOp, Call, Expr, Matcher, StartOrEnd, Subquery,
        VectorMatching, format_number,
    },
    duration::format_duration,
    escape::escape_string,
    fragment::{Fragment, FragmentBuilder, SpanKind},
    parens::{Side, needs_parens},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The tree holds a node of a type this formatter does not know.
    #[error("unsupported node type")]
    UnsupportedNodeKind,
}

/// How much of a tree to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_children: bool,
    /// Remaining descent budget; `None` is unlimited
    pub max_depth: Option<u32>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            show_children: true,
            max_depth: None,
        }
    }
}

impl RenderOptions {
    /// Only the node's own decorations, no sub-expressions.
    pub fn compact() -> Self {
        RenderOptions {
            show_children: false,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Renders `node`. See the module docs for the meaning of the options.
pub fn render(
    node: &Expr,
    show_children: bool,
    max_depth: Option<u32>,
) -> Result<Fragment, FormatError> {
    render_with(
        node,
        &RenderOptions {
            show_children,
            max_depth,
        },
    )
}

pub fn render_with(node: &Expr, options: &RenderOptions) -> Result<Fragment, FormatError> {
    Formatter {
        show_children: options.show_children,
    }
    .format_node(node, options.max_depth)
}

struct Formatter {
    show_children: bool,
}

impl Formatter {
    fn format_node(&self, node: &Expr, max_depth: Option<u32>) -> Result<Fragment, FormatError> {
        if max_depth == Some(0) {
            trace!(kind = node.kind(), "depth budget exhausted");
            return Ok(Fragment::ellipsis());
        }
        let child_depth = max_depth.map(|d| d - 1);

        let mut out = FragmentBuilder::new();
        match node {
            Expr::Aggregation(agg) => self.format_aggregation(&mut out, agg, child_depth)?,
            Expr::Subquery(sq) => self.format_subquery(&mut out, sq, child_depth)?,
            Expr::ParenExpr(paren) => return self.format_paren(&paren.expr, child_depth),
            Expr::Call(call) => self.format_call(&mut out, call, child_depth)?,
            Expr::MatrixSelector(sel) => {
                format_selector(&mut out, &sel.name, &sel.matchers);
                out.text("[")
                    .push(SpanKind::Duration, format_duration(sel.range))
                    .text("]");
                format_at_and_offset(&mut out, sel.timestamp, sel.start_or_end, sel.offset);
            }
            Expr::VectorSelector(sel) => {
                format_selector(&mut out, &sel.name, &sel.matchers);
                format_at_and_offset(&mut out, sel.timestamp, sel.start_or_end, sel.offset);
            }
            Expr::NumberLiteral(num) => {
                out.push(SpanKind::Number, format_number(num.val));
            }
            Expr::StringLiteral(s) => {
                out.push(SpanKind::String, quoted(&s.val));
            }
            Expr::UnaryExpr(unary) => {
                out.text(unary.op.as_str());
                if self.show_children {
                    out.child(self.format_node(&unary.expr, child_depth)?);
                }
            }
            Expr::BinaryExpr(bin) => self.format_binary(&mut out, bin, child_depth)?,
            Expr::Placeholder(_) => return Ok(Fragment::ellipsis()),
            Expr::Unsupported => {
                debug!("refusing to render node of unknown type");
                return Err(FormatError::UnsupportedNodeKind);
            }
        }
        Ok(out.finish())
    }

    fn format_aggregation(
        &self,
        out: &mut FragmentBuilder,
        agg: &Aggregation,
        child_depth: Option<u32>,
    ) -> Result<(), FormatError> {
        out.keyword(agg.op.as_str());
        if agg.without {
            out.text(" ").keyword("without").label_list(&agg.grouping).text(" ");
        } else if !agg.grouping.is_empty() {
            out.text(" ").keyword("by").label_list(&agg.grouping).text(" ");
        }

        if self.show_children {
            out.text("(");
            if let Some(param) = &agg.param {
                out.child(self.format_node(param, child_depth)?).text(", ");
            }
            out.child(self.format_node(&agg.expr, child_depth)?).text(")");
        }
        Ok(())
    }

    fn format_subquery(
        &self,
        out: &mut FragmentBuilder,
        sq: &Subquery,
        child_depth: Option<u32>,
    ) -> Result<(), FormatError> {
        if self.show_children {
            out.child(self.format_node(&sq.expr, child_depth)?);
        }
        out.text("[")
            .push(SpanKind::Duration, format_duration(sq.range))
            .text(":");
        if sq.step != 0 {
            out.push(SpanKind::Duration, format_duration(sq.step));
        }
        out.text("]");
        format_at_and_offset(out, sq.timestamp, sq.start_or_end, sq.offset);
        Ok(())
    }

    fn format_paren(&self, inner: &Expr, child_depth: Option<u32>) -> Result<Fragment, FormatError> {
        let mut out = FragmentBuilder::new();
        out.text("(");
        if self.show_children {
            out.child(self.format_node(inner, child_depth)?);
        }
        out.text(")");
        Ok(out.finish())
    }

    fn format_call(
        &self,
        out: &mut FragmentBuilder,
        call: &Call,
        child_depth: Option<u32>,
    ) -> Result<(), FormatError> {
        out.keyword(call.func.name.as_str());
        if !self.show_children {
            return Ok(());
        }

        out.text("(");
        if child_depth.is_none_or(|d| d > 0) {
            for (i, arg) in call.args.iter().enumerate() {
                if i != 0 {
                    out.text(", ");
                }
                out.child(self.format_node(arg, child_depth)?);
            }
        } else if !call.args.is_empty() {
            out.child(Fragment::ellipsis());
        }
        out.text(")");
        Ok(())
    }

    fn format_binary(
        &self,
        out: &mut FragmentBuilder,
        bin: &BinaryExpr,
        child_depth: Option<u32>,
    ) -> Result<(), FormatError> {
        if self.show_children {
            out.child(self.format_operand(bin.op, &bin.lhs, Side::Lhs, child_depth)?);
        }
        out.text(" ");
        if bin.op.is_keyword() {
            out.keyword(bin.op.as_str());
        } else {
            out.text(bin.op.as_str());
        }
        if bin.bool {
            out.text(" ").keyword("bool");
        }
        if let Some(matching) = &bin.matching {
            format_matching(out, matching);
        }
        out.text(" ");
        if self.show_children {
            out.child(self.format_operand(bin.op, &bin.rhs, Side::Rhs, child_depth)?);
        }
        Ok(())
    }

    /// An operand that needs parentheses is rendered as though it were
    /// wrapped in a `ParenExpr`, so the wrapper takes a level of depth.
    fn format_operand(
        &self,
        op: BinaryOp,
        child: &Expr,
        side: Side,
        max_depth: Option<u32>,
    ) -> Result<Fragment, FormatError> {
        if !needs_parens(op, child, side) {
            return self.format_node(child, max_depth);
        }
        if max_depth == Some(0) {
            return Ok(Fragment::ellipsis());
        }
        self.format_paren(child, max_depth.map(|d| d - 1))
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", escape_string(value))
}

/// `name{label="value",...}`, leaving out the `__name__` matcher that only
/// restates `name`.
fn format_selector(out: &mut FragmentBuilder, name: &str, matchers: &[Matcher]) {
    out.text(name);

    let shown: Vec<&Matcher> = matchers.iter().filter(|m| !m.restates_name(name)).collect();
    if shown.is_empty() {
        return;
    }

    out.text("{");
    for (i, m) in shown.iter().enumerate() {
        if i != 0 {
            out.text(",");
        }
        out.push(SpanKind::LabelName, m.name.as_str())
            .text(m.kind.as_str())
            .push(SpanKind::String, quoted(&m.value));
    }
    out.text("}");
}

fn format_at_and_offset(
    out: &mut FragmentBuilder,
    timestamp: Option<i64>,
    start_or_end: Option<StartOrEnd>,
    offset: i64,
) {
    if let Some(ts) = timestamp {
        // Milliseconds with scale 3 print as seconds with three decimals.
        out.text(" ")
            .text("@")
            .text(" ")
            .push(SpanKind::Number, Decimal::new(ts, 3).to_string());
    } else if let Some(anchor) = start_or_end {
        out.text(" ")
            .text("@")
            .text(" ")
            .keyword(anchor.as_str())
            .text("(")
            .text(")");
    }

    if offset != 0 {
        let sign = if offset < 0 { "-" } else { "" };
        out.text(" ").keyword("offset").text(" ").push(
            SpanKind::Duration,
            format!("{sign}{}", format_duration(offset.unsigned_abs())),
        );
    }
}

fn format_matching(out: &mut FragmentBuilder, matching: &VectorMatching) {
    if !matching.has_clause() {
        return;
    }

    let keyword = if matching.on { "on" } else { "ignoring" };
    out.text(" ").keyword(keyword).label_list(&matching.labels);

    if let Some(group) = matching.group_keyword() {
        out.text(" ").keyword(group).label_list(&matching.include);
    }
}
