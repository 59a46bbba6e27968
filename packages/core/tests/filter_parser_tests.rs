//! Filter expression grammar and static typing tests
//!
//! The parser enforces the RFC 9535 well-typedness rules: comparison
//! operands must produce a value, test positions must not be plain
//! values, and function arguments are checked against declared parameter
//! types at parse time.

use jpq::functions::{FunctionExtension, FunctionType, TypedValue};
use jpq::{
    parse_expression, parse_query, parse_query_with, ComparisonOp, ErrorKind, FilterExpression,
    QueryContext, SubQueryKind,
};

#[test]
fn test_existence_filter() {
    let query = parse_query("$[?@.a]").expect("existence filter should parse");
    let expr = match &query.segments[0] {
        jpq::Segment::Child { selectors } => match &selectors[0] {
            jpq::Selector::Filter(expr) => expr.clone(),
            other => panic!("expected filter selector, got {other:?}"),
        },
        other => panic!("expected child segment, got {other:?}"),
    };
    assert!(matches!(
        expr,
        FilterExpression::SubQuery {
            kind: SubQueryKind::Current,
            ..
        }
    ));
}

#[test]
fn test_operator_precedence() {
    // || binds loosest, then &&, then comparison
    let expr = parse_expression("@.a == 1 && @.b < 2 || @.c").expect("expression should parse");
    match expr {
        FilterExpression::Or(operands) => {
            assert_eq!(operands.len(), 2);
            match &operands[0] {
                FilterExpression::And(conjuncts) => {
                    assert_eq!(conjuncts.len(), 2);
                    assert!(matches!(
                        conjuncts[0],
                        FilterExpression::Comparison {
                            op: ComparisonOp::Equal,
                            ..
                        }
                    ));
                }
                other => panic!("expected conjunction, got {other:?}"),
            }
            assert!(matches!(operands[1], FilterExpression::SubQuery { .. }));
        }
        other => panic!("expected disjunction, got {other:?}"),
    }
}

#[test]
fn test_n_ary_logical_operators() {
    let expr = parse_expression("@.a && @.b && @.c").expect("chain should parse");
    match expr {
        FilterExpression::And(operands) => assert_eq!(operands.len(), 3),
        other => panic!("expected conjunction, got {other:?}"),
    }
}

#[test]
fn test_parenthesized_grouping() {
    let expr = parse_expression("(@.a || @.b) && @.c").expect("grouped expression should parse");
    match expr {
        FilterExpression::And(operands) => {
            assert!(matches!(operands[0], FilterExpression::Or(_)));
        }
        other => panic!("expected conjunction, got {other:?}"),
    }
}

#[test]
fn test_negation() {
    assert!(matches!(
        parse_expression("!@.a").expect("negated query should parse"),
        FilterExpression::Not(_)
    ));
    assert!(matches!(
        parse_expression("!(@.a == 1)").expect("negated comparison should parse"),
        FilterExpression::Not(_)
    ));
    // a bare literal under ! is not a test expression
    assert!(parse_expression("!1").is_err());
}

#[test]
fn test_literals() {
    for (input, expected) in [
        ("@ == 'x'", serde_json::json!("x")),
        ("@ == \"x\"", serde_json::json!("x")),
        ("@ == 5", serde_json::json!(5)),
        ("@ == -1.5", serde_json::json!(-1.5)),
        ("@ == 1e2", serde_json::json!(100.0)),
        ("@ == 1.5e-3", serde_json::json!(0.0015)),
        ("@ == true", serde_json::json!(true)),
        ("@ == false", serde_json::json!(false)),
        ("@ == null", serde_json::json!(null)),
    ] {
        let expr = parse_expression(input).expect("literal comparison should parse");
        match expr {
            FilterExpression::Comparison { right, .. } => {
                assert_eq!(*right, FilterExpression::Literal(expected), "for {input}");
            }
            other => panic!("expected comparison, got {other:?}"),
        }
    }
}

#[test]
fn test_number_literal_lexical_rules() {
    // -0 is valid as a number literal, unlike as an index
    assert!(parse_expression("@ == -0").is_ok());
    assert!(parse_expression("@ == 0.5").is_ok());
    assert!(parse_expression("@ == 01").is_err(), "leading zeros");
    assert!(parse_expression("@ == 1.").is_err(), "empty fraction");
    assert!(parse_expression("@ == 1e").is_err(), "empty exponent");
}

#[test]
fn test_comparison_is_non_associative() {
    assert!(parse_query("$[?@.a == @.b == @.c]").is_err());
    assert!(parse_query("$[?1 < 2 < 3]").is_err());
}

#[test]
fn test_singular_query_gate() {
    // RFC 9535: only singular queries may appear beside a comparison
    assert!(parse_query("$[?@.a == 1]").is_ok());
    assert!(parse_query("$[?@.a.b[0] == 1]").is_ok());
    assert!(parse_query("$[?@ == $.x]").is_ok());
    assert!(parse_query("$[?@.* == 1]").is_err());
    assert!(parse_query("$[?@[*] == 1]").is_err());
    assert!(parse_query("$[?@..a == 1]").is_err());
    assert!(parse_query("$[?@['a', 'b'] == 1]").is_err());
    assert!(parse_query("$[?@[1:2] == 1]").is_err());
    assert!(parse_query("$[?@[?@.x] == 1]").is_err());
}

#[test]
fn test_literal_is_not_a_test_expression() {
    assert!(parse_query("$[?42]").is_err());
    assert!(parse_query("$[?'a']").is_err());
    assert!(parse_query("$[?@.a && 1]").is_err());
    assert!(parse_query("$[?(true)]").is_err());
    // but a comparison of two literals is well-formed
    assert!(parse_query("$[?'a' == 'a']").is_ok());
}

#[test]
fn test_function_typing_rules() {
    // Value-returning functions must be compared, not tested
    assert!(parse_query("$[?length(@.a)]").is_err());
    assert!(parse_query("$[?length(@.a) == 1]").is_ok());
    // Logical-returning functions must be tested, not compared
    assert!(parse_query("$[?match(@.a, 'x')]").is_ok());
    assert!(parse_query("$[?match(@.a, 'x') == true]").is_err());
    // Value parameters require singular queries
    assert!(parse_query("$[?length(@.*) < 3]").is_err());
    assert!(parse_query("$[?count(@.*) < 3]").is_ok());
    // Nodes parameters reject literals and value expressions
    assert!(parse_query("$[?count(1) == 1]").is_err());
    assert!(parse_query("$[?count(length(@.a)) == 1]").is_err());
    // nesting: value() feeds a Value parameter
    assert!(parse_query("$[?length(value(@.a)) == 1]").is_ok());
}

#[test]
fn test_function_arity_checking() {
    let err = parse_query("$[?length(@.a, 2) == 1]").expect_err("excess argument must fail");
    assert_eq!(err.kind, ErrorKind::ArityMismatch);
    let err = parse_query("$[?count() == 0]").expect_err("missing argument must fail");
    assert_eq!(err.kind, ErrorKind::ArityMismatch);
    assert!(parse_query("$[?match(@.a) == 1]").is_err());
}

#[test]
fn test_unknown_function_is_a_parse_error() {
    let err = parse_query("$[?frobnicate(@.a)]").expect_err("unknown function must fail");
    assert_eq!(err.kind, ErrorKind::UnknownFunction);
}

#[test]
fn test_unexpected_identifier() {
    assert!(parse_query("$[?nottrue]").is_err());
    assert!(parse_query("$[?True]").is_err(), "keywords are lowercase");
}

#[test]
fn test_logical_parameter_typing() {
    // a Logical parameter accepts tests and comparisons but not literals
    // or value-typed functions
    let context = QueryContext::new().with_function(FunctionExtension::new(
        "holds",
        vec![FunctionType::LogicalType],
        FunctionType::LogicalType,
        |args| match args {
            [TypedValue::Logical(b)] => TypedValue::Logical(*b),
            _ => TypedValue::Logical(false),
        },
    ));
    assert!(parse_query_with("$[?holds(@.a > 1)]", &context).is_ok());
    assert!(parse_query_with("$[?holds(@.a)]", &context).is_ok());
    assert!(parse_query_with("$[?holds(@.a && @.b)]", &context).is_ok());
    assert!(parse_query_with("$[?holds(match(@.a, 'x'))]", &context).is_ok());
    assert!(parse_query_with("$[?holds(true)]", &context).is_err());
    assert!(parse_query_with("$[?holds(length(@.a))]", &context).is_err());
}

#[test]
fn test_filter_inside_function_argument_is_typed_again() {
    // the test-expression rule is suspended for the argument itself but
    // re-applies inside a nested filter
    assert!(parse_query("$[?count(@[?@.x]) == 1]").is_ok());
    assert!(parse_query("$[?count(@[?42]) == 1]").is_err());
}

#[test]
fn test_whitespace_in_filters() {
    assert!(parse_query("$[? @.a == 1 ]").is_ok());
    assert!(parse_query("$[?@.a==1]").is_ok());
    assert!(parse_query("$[?\n@.a\t== 1]").is_ok());
}

#[test]
fn test_embedded_root_query() {
    let expr = parse_expression("$.x == @.y").expect("embedded root should parse");
    match expr {
        FilterExpression::Comparison { left, .. } => {
            assert!(matches!(
                *left,
                FilterExpression::SubQuery {
                    kind: SubQueryKind::Root,
                    ..
                }
            ));
        }
        other => panic!("expected comparison, got {other:?}"),
    }
}
