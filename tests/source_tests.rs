//! Source operator: iteration, extraction and per-node Cartesian products.


use hartig_core::value::{Binding, Value};
use hartig_operators::{JsonSourceOperator, OpError, Operator};
use serde_json::json;
use test_data_gen::{catalogue, column, team_source};

#[test]
fn test_team_roles_expand_to_three_tuples() {
    let rows = team_source().execute().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(column(&rows, "id"), vec!["1", "1", "2"]);
    assert_eq!(column(&rows, "role"), vec!["\"Dev\"", "\"Admin\"", "\"User\""]);
}

#[test]
fn test_tuple_count_is_product_of_match_counts() {
    let doc = json!({"nodes": [
        {"a": [1, 2, 3], "b": ["x", "y"], "c": "single"},
        {"a": [], "b": ["z"], "c": "other"},
        {"a": [4], "b": ["p", "q", "r", "s"]}
    ]});
    let src = JsonSourceOperator::new(
        doc,
        "$.nodes[*]",
        [("a", "$.a[*]"), ("b", "$.b[*]"), ("c", "$.c")],
    )
    .unwrap();
    let rows = src.execute().unwrap();
    // 3*2*1 + 1*1*1 (a absent) + 1*4*1 (c absent)
    assert_eq!(rows.len(), 6 + 1 + 4);
    assert!(rows[0..6].iter().all(|t| t.get("c") == Some(&Binding::bound("single"))));
    assert!(!rows[6].contains("a"));
    assert!(rows[7..].iter().all(|t| !t.contains("c")));
}

#[test]
fn test_execution_is_repeatable() {
    let src = catalogue(5, 3);
    let first = src.execute().unwrap();
    let second = src.execute().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 15);
}

#[test]
fn test_nested_values_are_kept_as_json() {
    let src = JsonSourceOperator::new(
        json!({"rows": [{"meta": {"k": "v"}, "n": null}]}),
        "$.rows[*]",
        [("meta", "$.meta"), ("n", "$.n")],
    )
    .unwrap();
    let rows = src.execute().unwrap();
    assert_eq!(rows[0].value("meta"), Some(&Value::from_json(&json!({"k": "v"}))));
    assert!(rows[0].value("n").unwrap().is_null());
}

#[test]
fn test_iterator_over_scalar_matches_nothing() {
    let src = JsonSourceOperator::new(json!({"x": 5}), "$.x[*]", [("v", "$")]).unwrap();
    assert!(src.execute().unwrap().is_empty());
}

#[test]
fn test_recursive_iterator_and_slices() {
    let doc = json!({"a": {"items": [{"v": 1}, {"v": 2}]}, "b": {"items": [{"v": 3}]}});
    let src = JsonSourceOperator::new(doc.clone(), "$..items[*]", [("v", "$.v")]).unwrap();
    assert_eq!(column(&src.execute().unwrap(), "v"), vec!["1", "2", "3"]);

    let src = JsonSourceOperator::new(doc, "$.a.items[-1:]", [("v", "$.v")]).unwrap();
    assert_eq!(column(&src.execute().unwrap(), "v"), vec!["2"]);
}

#[test]
fn test_invalid_queries_rejected_at_construction() {
    let err = JsonSourceOperator::new(json!({}), "$.a]", [("v", "$")])
        .err()
        .unwrap();
    assert!(matches!(&err, OpError::Query { query, .. } if query == "$.a]"));
    assert!(err.to_string().contains("$.a]"));

    let err = JsonSourceOperator::new(json!({}), "$", [("v", "$.team[0]['name'")])
        .err()
        .unwrap();
    assert!(matches!(err, OpError::Query { .. }));
}

#[test]
fn test_filter_iterator_selects_matching_nodes() {
    let doc = json!({"people": [{"n": "a", "age": 30}, {"n": "b", "age": 12}, {"n": "c", "age": 41}]});
    let src = JsonSourceOperator::new(doc, "$.people[?@.age > 18]", [("n", "$.n")]).unwrap();
    assert_eq!(column(&src.execute().unwrap(), "n"), vec!["\"a\"", "\"c\""]);
}

#[test]
fn test_slice_with_huge_step_does_not_overflow() {
    let doc = json!({"xs": [0, 1, 2, 3, 4]});
    let src = JsonSourceOperator::new(doc, "$.xs[1::9007199254740991]", [("v", "$")]).unwrap();
    assert_eq!(column(&src.execute().unwrap(), "v"), vec!["1"]);
}
