//! Selector application to a single node
//!
//! Name, wildcard, index, and slice selectors never fail: out-of-range
//! indices, missing members, and non-container nodes simply contribute
//! nothing.

use serde_json::Value;

use super::{filter, EvalScope};
use crate::ast::Selector;
use crate::json;

pub(crate) fn evaluate_selector<'a>(
    selector: &Selector,
    node: &'a Value,
    scope: &EvalScope<'a>,
    out: &mut Vec<&'a Value>,
) {
    match selector {
        Selector::Name(name) => {
            if let Value::Object(obj) = node {
                if let Some(member) = obj.get(name) {
                    out.push(member);
                }
            }
        }
        Selector::Wildcard => out.extend(json::children(node)),
        Selector::Index(index) => {
            if let Value::Array(arr) = node {
                if let Some(i) = normalize_index(*index, arr.len()) {
                    out.push(&arr[i]);
                }
            }
        }
        Selector::Slice { start, end, step } => {
            if let Value::Array(arr) = node {
                for i in slice_indices(arr.len(), *start, *end, *step) {
                    out.push(&arr[i]);
                }
            }
        }
        Selector::Filter(expr) => {
            for child in json::children(node) {
                if filter::evaluate_logical(expr, child, scope) {
                    out.push(child);
                }
            }
        }
    }
}

/// Map a possibly-negative index onto `0..len`
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let normalized = if index >= 0 { index } else { index + len };
    if normalized >= 0 && normalized < len {
        Some(normalized as usize)
    } else {
        None
    }
}

/// Element positions selected by a slice over an array of length `len`
///
/// RFC 9535 §2.3.4.2: defaults depend on the sign of the step, provided
/// negative bounds are normalized by adding `len`, and both bounds are
/// clamped before iteration. A zero step selects nothing.
fn slice_indices(len: usize, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Vec<usize> {
    let len = len as i64;
    let step = step.unwrap_or(1);
    if step == 0 || len == 0 {
        return Vec::new();
    }
    let normalize = |i: i64| if i >= 0 { i } else { len + i };
    let mut indices = Vec::new();
    if step > 0 {
        let lower = normalize(start.unwrap_or(0)).clamp(0, len);
        let upper = normalize(end.unwrap_or(len)).clamp(0, len);
        let mut i = lower;
        while i < upper {
            indices.push(i as usize);
            i += step;
        }
    } else {
        // The default end sits one below the first element after
        // normalization, hence the -1 sentinel.
        let upper = normalize(start.unwrap_or(len - 1)).clamp(-1, len - 1);
        let lower = end.map(normalize).unwrap_or(-1).clamp(-1, len - 1);
        let mut i = upper;
        while i > lower {
            indices.push(i as usize);
            i += step;
        }
    }
    indices
}
