//! RFC 9535 Section 2.4.8: value() function
//!
//! The single node of a one-element nodelist; Nothing for zero or several.

use super::TypedValue;

pub(super) fn evaluate(args: &[TypedValue]) -> TypedValue {
    match args.first() {
        Some(TypedValue::Nodes(nodes)) if nodes.len() == 1 => {
            TypedValue::Value(Some(nodes[0].clone()))
        }
        _ => TypedValue::nothing(),
    }
}
