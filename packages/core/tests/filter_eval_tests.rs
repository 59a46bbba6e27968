//! Filter expression evaluation tests: comparisons, Nothing, logic,
//! embedded sub-queries

use jpq::{evaluate_query_with, parse_query, JsonPathExt, QueryContext};
use serde_json::{json, Value};

fn run(path: &str, root: &Value) -> Vec<Value> {
    root.json_path(path)
        .unwrap_or_else(|err| panic!("query {path:?} should parse: {err}"))
        .all()
        .into_iter()
        .cloned()
        .collect()
}

#[test]
fn test_existence_filter() {
    let value = json!([{"a": 1}, {"b": 2}, {"a": null}]);
    // existence, not truthiness: a null member still exists
    assert_eq!(
        run("$[?@.a]", &value),
        vec![json!({"a": 1}), json!({"a": null})]
    );
}

#[test]
fn test_numeric_comparisons() {
    let value = json!([1, 2, 3, 4]);
    assert_eq!(run("$[?@ < 3]", &value), vec![json!(1), json!(2)]);
    assert_eq!(run("$[?@ <= 3]", &value), vec![json!(1), json!(2), json!(3)]);
    assert_eq!(run("$[?@ > 3]", &value), vec![json!(4)]);
    assert_eq!(run("$[?@ >= 3]", &value), vec![json!(3), json!(4)]);
    assert_eq!(run("$[?@ == 3]", &value), vec![json!(3)]);
    assert_eq!(run("$[?@ != 3]", &value), vec![json!(1), json!(2), json!(4)]);
}

#[test]
fn test_numbers_compare_across_representations() {
    let value = json!([1, 1.0, 1.5, 2]);
    assert_eq!(run("$[?@ == 1.0]", &value), vec![json!(1), json!(1.0)]);
    assert_eq!(run("$[?@ == 1]", &value), vec![json!(1), json!(1.0)]);
}

#[test]
fn test_string_comparisons() {
    let value = json!(["a", "b", "c"]);
    assert_eq!(run("$[?@ > 'a']", &value), vec![json!("b"), json!("c")]);
    assert_eq!(run("$[?@ == 'b']", &value), vec![json!("b")]);
    // scalar-value order, not UTF-16 code-unit order
    let unicode = json!(["\u{FF21}", "\u{1D11E}"]);
    assert_eq!(run("$[?@ < '\u{FFFF}']", &unicode), vec![json!("\u{FF21}")]);
}

#[test]
fn test_cross_type_ordering_is_false() {
    let value = json!([1, "1", true, null, [1], {"a": 1}]);
    assert_eq!(run("$[?@ < 2]", &value), vec![json!(1)]);
    assert_eq!(run("$[?@ <= 'z']", &value), vec![json!("1")]);
    // booleans, null, arrays, and objects are not orderable at all
    assert_eq!(run("$[?@ >= true]", &value), Vec::<Value>::new());
    assert_eq!(run("$[?@ <= null]", &value), Vec::<Value>::new());
}

#[test]
fn test_equality_on_structured_values() {
    let value = json!([[1, 2], [1, 2, 3], {"a": 1}, {"a": 2}]);
    assert_eq!(run("$[?@ == $[0]]", &value), vec![json!([1, 2])]);
    assert_eq!(run("$[?@.a == 1]", &value), vec![json!({"a": 1})]);
}

#[test]
fn test_null_is_a_value_not_nothing() {
    let value = json!({"b": [null]});
    assert_eq!(run("$.b[?@ == null]", &value), vec![json!(null)]);

    // a missing member compares as Nothing, which null never equals
    let value = json!({"c": [{}]});
    assert_eq!(run("$.c[?@.d == null]", &value), Vec::<Value>::new());
}

#[test]
fn test_nothing_comparison_semantics() {
    let value = json!([{"x": 1}, {}]);
    // Nothing == Nothing holds; for {} both sides are absent
    assert_eq!(run("$[?@.missing == @.alsomissing]", &value), vec![json!({"x": 1}), json!({})]);
    // <= and >= hold between two Nothings
    assert_eq!(run("$[?@.missing <= @.alsomissing]", &value), vec![json!({"x": 1}), json!({})]);
    // exactly one side absent: only != holds
    assert_eq!(run("$[?@.x == @.missing]", &value), vec![json!({})]);
    assert_eq!(run("$[?@.x != @.missing]", &value), vec![json!({"x": 1})]);
    assert_eq!(run("$[?@.x < @.missing]", &value), Vec::<Value>::new());
    assert_eq!(run("$[?@.x >= @.missing]", &value), Vec::<Value>::new());
}

#[test]
fn test_logical_operators() {
    let value = json!([
        {"a": 1, "b": 1},
        {"a": 1},
        {"b": 1},
        {}
    ]);
    assert_eq!(run("$[?@.a && @.b]", &value), vec![json!({"a": 1, "b": 1})]);
    assert_eq!(
        run("$[?@.a || @.b]", &value),
        vec![json!({"a": 1, "b": 1}), json!({"a": 1}), json!({"b": 1})]
    );
    assert_eq!(run("$[?!@.a]", &value), vec![json!({"b": 1}), json!({})]);
    assert_eq!(run("$[?!(@.a == 1)]", &value), vec![json!({"b": 1}), json!({})]);
}

#[test]
fn test_filter_over_object_members() {
    let value = json!({"o": {"j": 1, "k": 2, "l": "x"}});
    assert_eq!(run("$.o[?@ == 2]", &value), vec![json!(2)]);
    assert_eq!(run("$.o[?@ < 9]", &value), vec![json!(1), json!(2)]);
}

#[test]
fn test_filter_on_scalar_selects_nothing() {
    assert_eq!(run("$[?@ == 1]", &json!(42)), Vec::<Value>::new());
    assert_eq!(run("$[?@]", &json!("str")), Vec::<Value>::new());
}

#[test]
fn test_nested_sub_query_in_filter() {
    let value = json!([{"a": {"b": 3}}, {"a": {}}]);
    assert_eq!(run("$[?@.a.b == 3]", &value), vec![json!({"a": {"b": 3}})]);
    assert_eq!(run("$[?@.a[?@ > 2]]", &value), vec![json!({"a": {"b": 3}})]);
}

#[test]
fn test_embedded_root_query_sees_outer_argument() {
    let value = json!({"a": [{"b": 1}, {"b": 2}], "x": 2});
    assert_eq!(run("$.a[?@.b == $.x]", &value), vec![json!({"b": 2})]);
    // and inside nested filters as well
    let value = json!({"a": [[1], [2]], "x": 2});
    assert_eq!(run("$.a[?@[?@ == $.x]]", &value), vec![json!([2])]);
}

#[test]
fn test_query_argument_override() {
    // with_query_argument rebinds embedded `$` without moving the
    // top-level walk off the evaluation root
    let context = QueryContext::new().with_query_argument(json!({"x": 1}));
    let value = json!({"a": [{"b": 1}, {"b": 2}], "x": 2});
    let query = parse_query("$.a[?@.b == $.x]").expect("query should parse");
    assert_eq!(
        evaluate_query_with(&query, &value, &context).all(),
        vec![&json!({"b": 1})]
    );
}

#[test]
fn test_filter_combined_with_other_selectors() {
    let value = json!({"a": [1, 5, 2, 8]});
    assert_eq!(
        run("$.a[?@ > 1, 0]", &value),
        vec![json!(5), json!(2), json!(8), json!(1)]
    );
}
