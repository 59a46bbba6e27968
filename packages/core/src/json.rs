//! JSON value primitives consumed by the evaluator
//!
//! Thin layer over `serde_json::Value`: ordered child enumeration, pre-order
//! descendant collection, numeric-aware deep equality, and the tri-state
//! ordering used by comparison operators. Object members enumerate in
//! insertion order (`serde_json` with `preserve_order`).

use std::cmp::Ordering;

use serde_json::Value;

/// Ordered children of a node: array elements, then nothing else for arrays;
/// member values for objects; empty for primitives.
pub(crate) fn children(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(arr) => arr.iter().collect(),
        Value::Object(obj) => obj.values().collect(),
        _ => Vec::new(),
    }
}

/// Collect every descendant of `node` in pre-order: each child precedes its
/// own children; arrays in index order, objects in insertion order.
pub(crate) fn descendants<'a>(node: &'a Value, out: &mut Vec<&'a Value>) {
    match node {
        Value::Array(arr) => {
            for value in arr {
                out.push(value);
                descendants(value, out);
            }
        }
        Value::Object(obj) => {
            for value in obj.values() {
                out.push(value);
                descendants(value, out);
            }
        }
        _ => {}
    }
}

/// Deep JSON-value equality
///
/// Numbers compare by numeric value, so `1 == 1.0`, unlike
/// `serde_json::Number`'s representation equality.
pub(crate) fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_numbers(a, b) == Some(Ordering::Equal),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(u, v)| equal(u, v))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, u)| y.get(k).is_some_and(|v| equal(u, v)))
        }
        _ => a == b,
    }
}

/// Tri-state ordering on the mutually orderable subset of JSON values:
/// numbers with numbers, strings with strings (Unicode scalar value order).
/// `None` for every other pairing.
pub(crate) fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_numbers(a, b),
        // Byte order on UTF-8 coincides with scalar-value order
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    let (x, y) = (a.as_number()?, b.as_number()?);
    if let (Some(i), Some(j)) = (x.as_i64(), y.as_i64()) {
        return Some(i.cmp(&j));
    }
    if let (Some(i), Some(j)) = (x.as_u64(), y.as_u64()) {
        return Some(i.cmp(&j));
    }
    x.as_f64()?.partial_cmp(&y.as_f64()?)
}

/// String length in Unicode scalar values, not UTF-16 code units
pub(crate) fn unicode_length(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_compare_by_value() {
        assert!(equal(&json!(1), &json!(1.0)));
        assert!(!equal(&json!(1), &json!(1.5)));
        assert_eq!(compare(&json!(2), &json!(10)), Some(Ordering::Less));
        assert_eq!(compare(&json!(2.5), &json!(2)), Some(Ordering::Greater));
    }

    #[test]
    fn mixed_types_are_unordered() {
        assert_eq!(compare(&json!("a"), &json!(1)), None);
        assert_eq!(compare(&json!(true), &json!(true)), None);
        assert_eq!(compare(&json!(null), &json!(null)), None);
    }

    #[test]
    fn deep_equality_recurses() {
        assert!(equal(&json!({"a": [1, 2]}), &json!({"a": [1.0, 2.0]})));
        assert!(!equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn descendant_order_is_preorder() {
        let v = json!({"a": [1, 2], "b": 3});
        let mut out = Vec::new();
        descendants(&v, &mut out);
        let got: Vec<Value> = out.into_iter().cloned().collect();
        assert_eq!(got, vec![json!([1, 2]), json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn scalar_length_counts_code_points() {
        assert_eq!(unicode_length("é"), 1);
        assert_eq!(unicode_length("héllo"), 5);
        assert_eq!(unicode_length("𝄞"), 1);
    }
}
