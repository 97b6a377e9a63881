use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::nullable_list;
use crate::ast::{BinaryOp, MatrixSelector, StartOrEnd, UnaryOp, VectorMatching, VectorSelector};

/// A parsed PromQL expression.
///
/// The JSON form is the tree returned by Prometheus' `/api/v1/parse_query`,
/// discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expr {
    /// `sum by(job) (x)`, `topk(5, x)`
    Aggregation(Aggregation),

    /// `x[30m:1m]`
    Subquery(Subquery),

    /// `(x)`
    ParenExpr(ParenExpr),

    /// `rate(x[5m])`
    Call(Call),

    /// `x{a="b"}[5m]`
    MatrixSelector(MatrixSelector),

    /// `x{a="b"}`
    VectorSelector(VectorSelector),

    /// `42`, `Inf`
    NumberLiteral(NumberLiteral),

    /// `"text"`
    StringLiteral(StringLiteral),

    /// `-x`
    UnaryExpr(UnaryExpr),

    /// `a + b`, `a / on(job) b`
    BinaryExpr(BinaryExpr),

    /// Hole left by error recovery in an incomplete query.
    Placeholder(Placeholder),

    /// A node whose `type` tag is not known. Rendering it is an error.
    #[serde(other)]
    Unsupported,
}

impl Expr {
    pub fn number(val: f64) -> Self {
        Expr::NumberLiteral(NumberLiteral { val })
    }

    pub fn string(val: impl Into<String>) -> Self {
        Expr::StringLiteral(StringLiteral { val: val.into() })
    }

    pub fn paren(expr: Expr) -> Self {
        Expr::ParenExpr(ParenExpr {
            expr: Box::new(expr),
        })
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(Call {
            func: Function { name: name.into() },
            args,
        })
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Expr::UnaryExpr(UnaryExpr {
            op,
            expr: Box::new(expr),
        })
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::BinaryExpr(BinaryExpr::new(op, lhs, rhs))
    }

    pub fn placeholder() -> Self {
        Expr::Placeholder(Placeholder::default())
    }

    /// The JSON `type` tag of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Aggregation(_) => "aggregation",
            Expr::Subquery(_) => "subquery",
            Expr::ParenExpr(_) => "parenExpr",
            Expr::Call(_) => "call",
            Expr::MatrixSelector(_) => "matrixSelector",
            Expr::VectorSelector(_) => "vectorSelector",
            Expr::NumberLiteral(_) => "numberLiteral",
            Expr::StringLiteral(_) => "stringLiteral",
            Expr::UnaryExpr(_) => "unaryExpr",
            Expr::BinaryExpr(_) => "binaryExpr",
            Expr::Placeholder(_) => "placeholder",
            Expr::Unsupported => "unsupported",
        }
    }
}

impl From<VectorSelector> for Expr {
    fn from(selector: VectorSelector) -> Self {
        Expr::VectorSelector(selector)
    }
}

impl From<MatrixSelector> for Expr {
    fn from(selector: MatrixSelector) -> Self {
        Expr::MatrixSelector(selector)
    }
}

impl From<Aggregation> for Expr {
    fn from(aggregation: Aggregation) -> Self {
        Expr::Aggregation(aggregation)
    }
}

impl From<Subquery> for Expr {
    fn from(subquery: Subquery) -> Self {
        Expr::Subquery(subquery)
    }
}

impl From<BinaryExpr> for Expr {
    fn from(binary: BinaryExpr) -> Self {
        Expr::BinaryExpr(binary)
    }
}

/// Aggregation over a vector, with optional `by`/`without` grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub op: String,
    #[serde(default)]
    pub without: bool,
    #[serde(default, deserialize_with = "nullable_list")]
    pub grouping: Vec<String>,
    /// Parameter of `topk`, `quantile`, `count_values`, ...
    #[serde(default)]
    pub param: Option<Box<Expr>>,
    pub expr: Box<Expr>,
}

impl Aggregation {
    pub fn new(op: impl Into<String>, expr: Expr) -> Self {
        Aggregation {
            op: op.into(),
            without: false,
            grouping: Vec::new(),
            param: None,
            expr: Box::new(expr),
        }
    }

    pub fn by(mut self, labels: &[&str]) -> Self {
        self.without = false;
        self.grouping = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn without(mut self, labels: &[&str]) -> Self {
        self.without = true;
        self.grouping = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_param(mut self, param: Expr) -> Self {
        self.param = Some(Box::new(param));
        self
    }
}

/// `expr[range:step]` with optional `@` and `offset` modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subquery {
    pub expr: Box<Expr>,
    pub range: u64,
    /// `0` selects the default evaluation interval and is not printed
    #[serde(default)]
    pub step: u64,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub start_or_end: Option<StartOrEnd>,
    #[serde(default)]
    pub offset: i64,
}

impl Subquery {
    pub fn new(expr: Expr, range_ms: u64, step_ms: u64) -> Self {
        Subquery {
            expr: Box::new(expr),
            range: range_ms,
            step: step_ms,
            timestamp: None,
            start_or_end: None,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenExpr {
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub func: Function,
    #[serde(default, deserialize_with = "nullable_list")]
    pub args: Vec<Expr>,
}

/// Numeric literal.
///
/// Prometheus sends the value as a string (`"1"`, `"Inf"`, `"NaN"`) since
/// JSON has no spelling for the non-finite values. Plain JSON numbers are
/// accepted too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberLiteral {
    pub val: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringLiteral {
    pub val: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    /// `bool` modifier on comparisons
    #[serde(default)]
    pub bool: bool,
    #[serde(default)]
    pub matching: Option<VectorMatching>,
}

impl BinaryExpr {
    pub fn new(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            bool: false,
            matching: None,
        }
    }

    pub fn with_bool(mut self) -> Self {
        self.bool = true;
        self
    }

    pub fn with_matching(mut self, matching: VectorMatching) -> Self {
        self.matching = Some(matching);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Placeholder {
    #[serde(default, deserialize_with = "nullable_list")]
    pub children: Vec<Expr>,
}

/// PromQL spelling of a float: `Inf`, `-Inf`, `NaN`, otherwise the
/// shortest decimal that round-trips (`42`, `0.5`).
pub fn format_number(val: f64) -> String {
    if val.is_nan() {
        "NaN".to_string()
    } else if val == f64::INFINITY {
        "Inf".to_string()
    } else if val == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        val.to_string()
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    match unsigned.to_ascii_lowercase().as_str() {
        "inf" | "infinity" => Some(sign * f64::INFINITY),
        "nan" => Some(f64::NAN),
        _ => trimmed.parse().ok(),
    }
}

impl Serialize for NumberLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("NumberLiteral", 1)?;
        state.serialize_field("val", &format_number(self.val))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for NumberLiteral {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawNumber {
            Float(f64),
            Text(String),
        }

        #[derive(Deserialize)]
        struct Raw {
            val: RawNumber,
        }

        let raw = Raw::deserialize(deserializer)?;
        let val = match raw.val {
            RawNumber::Float(n) => n,
            RawNumber::Text(s) => parse_number(&s)
                .ok_or_else(|| de::Error::custom(format!("invalid number literal: {s:?}")))?,
        };
        Ok(NumberLiteral { val })
    }
}
