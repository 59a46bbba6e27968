//! RFC 9535 Section 2.4.4: length() function
//!
//! Unicode scalar length of a string, element count of an array, member
//! count of an object; Nothing for every other argument.

use serde_json::Value;

use super::TypedValue;
use crate::json;

pub(super) fn evaluate(args: &[TypedValue]) -> TypedValue {
    let value = match args.first() {
        Some(TypedValue::Value(Some(value))) => value,
        _ => return TypedValue::nothing(),
    };
    let length = match value {
        Value::String(s) => json::unicode_length(s),
        Value::Array(arr) => arr.len(),
        Value::Object(obj) => obj.len(),
        _ => return TypedValue::nothing(),
    };
    TypedValue::Value(Some(Value::from(length as u64)))
}
