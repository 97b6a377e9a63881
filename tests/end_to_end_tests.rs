// End-to-end tests
//
// Trees below are shaped like the JSON Prometheus returns from
// /api/v1/parse_query for the query in each test name.

use pretty_assertions::assert_eq;
use promql_fmt::ast::{Cardinality, Expr};
use promql_fmt::format::{FormatError, render};
use promql_fmt::fragment::SpanKind;

fn decode(json: &str) -> Expr {
    serde_json::from_str(json).expect("fixture should decode")
}

fn plain(json: &str) -> String {
    render(&decode(json), true, None).unwrap().to_string()
}

const SUM_WITHOUT_RATE: &str = r#"{
  "type": "aggregation",
  "op": "sum",
  "without": true,
  "grouping": ["instance"],
  "param": null,
  "expr": {
    "type": "call",
    "func": {"name": "rate", "argTypes": ["matrix"], "variadic": 0, "returnType": "vector"},
    "args": [{
      "type": "matrixSelector",
      "name": "http_requests_total",
      "range": 300000,
      "offset": 0,
      "timestamp": null,
      "startOrEnd": null,
      "matchers": [
        {"type": "=", "name": "job", "value": "api"},
        {"type": "=", "name": "__name__", "value": "http_requests_total"}
      ]
    }]
  }
}"#;

#[test]
fn e2e_sum_without_rate() {
    assert_eq!(
        plain(SUM_WITHOUT_RATE),
        r#"sum without(instance) (rate(http_requests_total{job="api"}[5m]))"#
    );
}

#[test]
fn e2e_sum_without_rate_spans() {
    let fragment = render(&decode(SUM_WITHOUT_RATE), true, None).unwrap();

    assert_eq!(
        fragment.texts_of(SpanKind::Keyword),
        vec!["sum", "without", "rate"]
    );
    assert_eq!(fragment.texts_of(SpanKind::LabelName), vec!["instance", "job"]);
    assert_eq!(fragment.texts_of(SpanKind::String), vec![r#""api""#]);
    assert_eq!(fragment.texts_of(SpanKind::Duration), vec!["5m"]);
}

#[test]
fn e2e_sum_without_rate_tree_labels() {
    // A tree view labels each node with its compact rendering.
    let expr = decode(SUM_WITHOUT_RATE);
    assert_eq!(render(&expr, false, None).unwrap().to_string(), "sum without(instance) ");

    let Expr::Aggregation(agg) = &expr else {
        panic!("expected aggregation");
    };
    assert_eq!(render(&agg.expr, false, None).unwrap().to_string(), "rate");
}

#[test]
fn e2e_error_ratio_on_group_left() {
    let json = r#"{
      "type": "binaryExpr",
      "op": "/",
      "bool": false,
      "lhs": {"type": "vectorSelector", "name": "errors", "offset": 0, "timestamp": null, "startOrEnd": null,
              "matchers": [{"type": "=", "name": "__name__", "value": "errors"}]},
      "rhs": {"type": "vectorSelector", "name": "requests", "offset": 0, "timestamp": null, "startOrEnd": null,
              "matchers": [{"type": "=", "name": "__name__", "value": "requests"}]},
      "matching": {"card": "many-to-one", "labels": ["job"], "on": true, "include": ["instance"]}
    }"#;

    let expr = decode(json);
    let Expr::BinaryExpr(bin) = &expr else {
        panic!("expected binary expression");
    };
    assert_eq!(bin.matching.as_ref().map(|m| m.card), Some(Cardinality::ManyToOne));
    assert_eq!(plain(json), "errors / on(job) group_left(instance) requests");
}

#[test]
fn e2e_null_lists_from_go() {
    let json = r#"{
      "type": "binaryExpr",
      "op": "*",
      "bool": false,
      "lhs": {"type": "numberLiteral", "val": "2"},
      "rhs": {"type": "vectorSelector", "name": "x", "offset": 0, "timestamp": null, "startOrEnd": null,
              "matchers": null},
      "matching": {"card": "one-to-one", "labels": null, "on": false, "include": null}
    }"#;
    assert_eq!(plain(json), "2 * x");
}

#[test]
fn e2e_comparison_bool() {
    let json = r#"{
      "type": "binaryExpr",
      "op": ">",
      "bool": true,
      "lhs": {"type": "vectorSelector", "name": "up", "offset": 0, "timestamp": null, "startOrEnd": null,
              "matchers": [{"type": "=", "name": "__name__", "value": "up"}]},
      "rhs": {"type": "numberLiteral", "val": "0"},
      "matching": {"card": "one-to-one", "labels": [], "on": false, "include": []}
    }"#;
    assert_eq!(plain(json), "up > bool 0");
}

#[test]
fn e2e_set_operator() {
    let json = r#"{
      "type": "binaryExpr",
      "op": "unless",
      "bool": false,
      "lhs": {"type": "vectorSelector", "name": "a", "offset": 0, "timestamp": null, "startOrEnd": null, "matchers": []},
      "rhs": {"type": "vectorSelector", "name": "b", "offset": 0, "timestamp": null, "startOrEnd": null, "matchers": []},
      "matching": {"card": "many-to-many", "labels": ["instance"], "on": false, "include": []}
    }"#;
    assert_eq!(plain(json), "a unless ignoring(instance) b");
}

#[test]
fn e2e_subquery_with_modifiers() {
    let json = r#"{
      "type": "subquery",
      "range": 3600000,
      "step": 0,
      "offset": -60000,
      "timestamp": null,
      "startOrEnd": "end",
      "expr": {
        "type": "call",
        "func": {"name": "rate"},
        "args": [{"type": "matrixSelector", "name": "foo", "range": 300000, "offset": 0,
                  "timestamp": null, "startOrEnd": null, "matchers": []}]
      }
    }"#;
    assert_eq!(plain(json), "rate(foo[5m])[1h:] @ end() offset -1m");
}

#[test]
fn e2e_selector_at_timestamp() {
    let json = r#"{"type": "vectorSelector", "name": "up", "offset": 300000,
                   "timestamp": 1700000000000, "startOrEnd": null, "matchers": []}"#;
    assert_eq!(plain(json), "up @ 1700000000.000 offset 5m");
}

#[test]
fn e2e_topk_quantile_literals() {
    let json = r#"{
      "type": "aggregation",
      "op": "topk",
      "without": false,
      "grouping": ["job"],
      "param": {"type": "numberLiteral", "val": "3"},
      "expr": {
        "type": "call",
        "func": {"name": "histogram_quantile"},
        "args": [
          {"type": "numberLiteral", "val": 0.99},
          {"type": "parenExpr", "expr": {"type": "unaryExpr", "op": "-",
             "expr": {"type": "vectorSelector", "name": "lat", "offset": 0, "timestamp": null,
                      "startOrEnd": null, "matchers": []}}}
        ]
      }
    }"#;
    assert_eq!(plain(json), "topk by(job) (3, histogram_quantile(0.99, (-lat)))");
}

#[test]
fn e2e_non_finite_numbers() {
    assert_eq!(plain(r#"{"type": "numberLiteral", "val": "Inf"}"#), "Inf");
    assert_eq!(plain(r#"{"type": "numberLiteral", "val": "+Inf"}"#), "Inf");
    assert_eq!(plain(r#"{"type": "numberLiteral", "val": "-Inf"}"#), "-Inf");
    assert_eq!(plain(r#"{"type": "numberLiteral", "val": "NaN"}"#), "NaN");
    assert!(serde_json::from_str::<Expr>(r#"{"type": "numberLiteral", "val": "twelve"}"#).is_err());
}

#[test]
fn e2e_string_literal() {
    let json = r#"{"type": "stringLiteral", "val": "a\"b\\c"}"#;
    assert_eq!(plain(json), r#""a\"b\\c""#);
}

#[test]
fn e2e_placeholder() {
    let json = r#"{"type": "placeholder", "children": [{"type": "numberLiteral", "val": "1"}]}"#;
    assert_eq!(plain(json), "…");
}

#[test]
fn e2e_unknown_node_type_fails_render() {
    let json = r#"{
      "type": "call",
      "func": {"name": "abs"},
      "args": [{"type": "durationExpr", "op": "+"}]
    }"#;
    let expr = decode(json);
    assert_eq!(render(&expr, true, None), Err(FormatError::UnsupportedNodeKind));
}

#[test]
fn e2e_ast_survives_json_round_trip() {
    let expr = decode(SUM_WITHOUT_RATE);
    let json = serde_json::to_string(&expr).unwrap();
    assert_eq!(decode(&json), expr);
}
