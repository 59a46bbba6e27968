//! Filter expression evaluation
//!
//! Two entry shapes, mirroring the type system: logical positions yield a
//! boolean; comparable positions yield a nodelist of length zero (Nothing)
//! or one. A well-typed AST from the parser never reaches the fallback
//! arms here; directly constructed ill-typed trees degrade to empty
//! results rather than failing.

use std::cmp::Ordering;

use serde_json::Value;

use super::{evaluate_segment, EvalScope};
use crate::ast::{ComparisonOp, FilterExpression, FunctionCall, Segment, SubQueryKind};
use crate::functions::{FunctionType, TypedValue};
use crate::json;

/// Evaluate an expression in a logical (test) position
pub(crate) fn evaluate_logical<'a>(
    expr: &FilterExpression,
    current: &'a Value,
    scope: &EvalScope<'a>,
) -> bool {
    match expr {
        FilterExpression::Or(operands) => operands
            .iter()
            .any(|operand| evaluate_logical(operand, current, scope)),
        FilterExpression::And(operands) => operands
            .iter()
            .all(|operand| evaluate_logical(operand, current, scope)),
        FilterExpression::Not(operand) => !evaluate_logical(operand, current, scope),
        FilterExpression::SubQuery { kind, segments } => {
            !evaluate_sub_query(*kind, segments, current, scope).is_empty()
        }
        FilterExpression::Comparison { left, op, right } => {
            let lhs = evaluate_comparable(left, current, scope);
            let rhs = evaluate_comparable(right, current, scope);
            compare_nodelists(&lhs, &rhs, *op)
        }
        FilterExpression::Function(call) => match call.extension.result_type() {
            FunctionType::LogicalType => match evaluate_function(call, current, scope) {
                TypedValue::Logical(b) => b,
                _ => false,
            },
            FunctionType::NodesType => match evaluate_function(call, current, scope) {
                TypedValue::Nodes(nodes) => !nodes.is_empty(),
                _ => false,
            },
            FunctionType::ValueType => {
                log::debug!(
                    "value-typed function '{}' in logical position",
                    call.extension.name()
                );
                false
            }
        },
        FilterExpression::Literal(_) => {
            log::debug!("literal in logical position");
            false
        }
    }
}

/// Evaluate an embedded `$` or `@` sub-query
pub(crate) fn evaluate_sub_query<'a>(
    kind: SubQueryKind,
    segments: &[Segment],
    current: &'a Value,
    scope: &EvalScope<'a>,
) -> Vec<&'a Value> {
    let root = match kind {
        SubQueryKind::Root => scope.root,
        SubQueryKind::Current => current,
    };
    let mut nodes = vec![root];
    for segment in segments {
        nodes = evaluate_segment(segment, &nodes, scope);
    }
    nodes
}

/// Evaluate an expression in a comparable position
///
/// Returns `[value]` for a present result and `[]` for Nothing; the
/// parser's singular-query gate keeps parsed operands at length 0 or 1.
pub(crate) fn evaluate_comparable<'a>(
    expr: &FilterExpression,
    current: &'a Value,
    scope: &EvalScope<'a>,
) -> Vec<Value> {
    match expr {
        FilterExpression::Literal(value) => vec![value.clone()],
        FilterExpression::SubQuery { kind, segments } => {
            evaluate_sub_query(*kind, segments, current, scope)
                .into_iter()
                .cloned()
                .collect()
        }
        FilterExpression::Function(call) => match evaluate_function(call, current, scope) {
            TypedValue::Value(Some(value)) => vec![value],
            TypedValue::Value(None) => Vec::new(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// The comparison table over 0/1-length operand nodelists
fn compare_nodelists(lhs: &[Value], rhs: &[Value], op: ComparisonOp) -> bool {
    match (lhs.len(), rhs.len()) {
        (0, 0) => matches!(
            op,
            ComparisonOp::Equal | ComparisonOp::LessEq | ComparisonOp::GreaterEq
        ),
        (0, 1) | (1, 0) => matches!(op, ComparisonOp::NotEqual),
        (1, 1) => {
            let (a, b) = (&lhs[0], &rhs[0]);
            match op {
                ComparisonOp::Equal => json::equal(a, b),
                ComparisonOp::NotEqual => !json::equal(a, b),
                ComparisonOp::Less => json::compare(a, b) == Some(Ordering::Less),
                ComparisonOp::LessEq => {
                    matches!(json::compare(a, b), Some(Ordering::Less | Ordering::Equal))
                }
                ComparisonOp::Greater => json::compare(a, b) == Some(Ordering::Greater),
                ComparisonOp::GreaterEq => {
                    matches!(
                        json::compare(a, b),
                        Some(Ordering::Greater | Ordering::Equal)
                    )
                }
            }
        }
        _ => false,
    }
}

/// Evaluate a function call: arguments by declared parameter type, then
/// dispatch to the extension
pub(crate) fn evaluate_function<'a>(
    call: &FunctionCall,
    current: &'a Value,
    scope: &EvalScope<'a>,
) -> TypedValue {
    let args: Vec<TypedValue> = call
        .extension
        .parameter_types()
        .iter()
        .zip(&call.args)
        .map(|(param, arg)| evaluate_function_argument(*param, arg, current, scope))
        .collect();
    call.extension.call(&args)
}

fn evaluate_function_argument<'a>(
    param: FunctionType,
    arg: &FilterExpression,
    current: &'a Value,
    scope: &EvalScope<'a>,
) -> TypedValue {
    match param {
        FunctionType::ValueType => match arg {
            FilterExpression::Literal(value) => TypedValue::Value(Some(value.clone())),
            FilterExpression::SubQuery { kind, segments } => {
                let nodes = evaluate_sub_query(*kind, segments, current, scope);
                if nodes.len() == 1 {
                    TypedValue::Value(Some(nodes[0].clone()))
                } else {
                    TypedValue::nothing()
                }
            }
            FilterExpression::Function(inner) => {
                match evaluate_function(inner, current, scope) {
                    value @ TypedValue::Value(_) => value,
                    _ => TypedValue::nothing(),
                }
            }
            _ => TypedValue::nothing(),
        },
        FunctionType::LogicalType => match arg {
            FilterExpression::Function(inner) => match evaluate_function(inner, current, scope) {
                TypedValue::Logical(b) => TypedValue::Logical(b),
                TypedValue::Nodes(nodes) => TypedValue::Logical(!nodes.is_empty()),
                TypedValue::Value(_) => TypedValue::Logical(false),
            },
            _ => TypedValue::Logical(evaluate_logical(arg, current, scope)),
        },
        FunctionType::NodesType => match arg {
            FilterExpression::SubQuery { kind, segments } => TypedValue::Nodes(
                evaluate_sub_query(*kind, segments, current, scope)
                    .into_iter()
                    .cloned()
                    .collect(),
            ),
            FilterExpression::Function(inner) => {
                match evaluate_function(inner, current, scope) {
                    nodes @ TypedValue::Nodes(_) => nodes,
                    _ => TypedValue::Nodes(Vec::new()),
                }
            }
            _ => TypedValue::Nodes(Vec::new()),
        },
    }
}
