use serde::{Deserialize, Serialize};

use super::nullable_list;

/// Label matcher comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// `=`
    #[serde(rename = "=")]
    Equal,
    /// `!=`
    #[serde(rename = "!=")]
    NotEqual,
    /// `=~`
    #[serde(rename = "=~")]
    MatchRegexp,
    /// `!~`
    #[serde(rename = "!~")]
    NotMatchRegexp,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Equal => "=",
            MatchType::NotEqual => "!=",
            MatchType::MatchRegexp => "=~",
            MatchType::NotMatchRegexp => "!~",
        }
    }
}

/// A single label constraint, e.g. `job="api"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matcher {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MatchType,
    pub value: String,
}

impl Matcher {
    pub fn new(name: impl Into<String>, kind: MatchType, value: impl Into<String>) -> Self {
        Matcher {
            name: name.into(),
            kind,
            value: value.into(),
        }
    }

    /// Shorthand for an `=` matcher.
    pub fn equal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, MatchType::Equal, value)
    }

    /// True for the `__name__="<metric>"` matcher the parser adds for a
    /// named selector. It restates the selector name and is not printed.
    pub fn restates_name(&self, metric: &str) -> bool {
        self.name == METRIC_NAME_LABEL && self.kind == MatchType::Equal && self.value == metric
    }
}

/// Reserved label carrying the metric name.
pub const METRIC_NAME_LABEL: &str = "__name__";

/// `@ start()` / `@ end()` anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartOrEnd {
    Start,
    End,
}

impl StartOrEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartOrEnd::Start => "start",
            StartOrEnd::End => "end",
        }
    }
}

/// Instant vector selector
///
/// # Example
/// ```text
/// http_requests_total{job="api"} @ 1700000000.000 offset 5m
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSelector {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub matchers: Vec<Matcher>,
    /// `@` timestamp in milliseconds
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub start_or_end: Option<StartOrEnd>,
    /// Offset in milliseconds, negative for `offset -5m`
    #[serde(default)]
    pub offset: i64,
}

impl VectorSelector {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        VectorSelector {
            matchers: vec![Matcher::equal(METRIC_NAME_LABEL, name.clone())],
            name,
            ..Self::default()
        }
    }

    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn with_offset(mut self, offset_ms: i64) -> Self {
        self.offset = offset_ms;
        self
    }

    pub fn with_timestamp(mut self, timestamp_ms: i64) -> Self {
        self.timestamp = Some(timestamp_ms);
        self
    }

    pub fn with_anchor(mut self, anchor: StartOrEnd) -> Self {
        self.start_or_end = Some(anchor);
        self
    }

    /// Turns this into a range selector over `range_ms`.
    pub fn over(self, range_ms: u64) -> MatrixSelector {
        MatrixSelector {
            name: self.name,
            matchers: self.matchers,
            range: range_ms,
            timestamp: self.timestamp,
            start_or_end: self.start_or_end,
            offset: self.offset,
        }
    }
}

/// Range vector selector
///
/// # Example
/// ```text
/// http_requests_total{job="api"}[5m]
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixSelector {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub matchers: Vec<Matcher>,
    /// Window in milliseconds
    pub range: u64,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub start_or_end: Option<StartOrEnd>,
    #[serde(default)]
    pub offset: i64,
}
