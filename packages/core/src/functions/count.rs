//! RFC 9535 Section 2.4.5: count() function
//!
//! Number of nodes in the argument nodelist. Nodelists are never
//! deduplicated, so repeated nodes count with their multiplicity.

use serde_json::Value;

use super::TypedValue;

pub(super) fn evaluate(args: &[TypedValue]) -> TypedValue {
    match args.first() {
        Some(TypedValue::Nodes(nodes)) => TypedValue::Value(Some(Value::from(nodes.len() as u64))),
        _ => TypedValue::nothing(),
    }
}
