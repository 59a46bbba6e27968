//! RFC 9535 JSONPath queries over `serde_json` values
//!
//! A query string is parsed into an immutable AST, evaluated against a
//! JSON root to produce an ordered, duplicate-preserving nodelist, and
//! printed back in canonical syntax. Filter expressions are statically
//! type-checked at parse time against the RFC's three-kinded function
//! type system, so a query that parses evaluates without errors.
//!
//! # Examples
//!
//! ```rust
//! use jpq::JsonPathExt;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), jpq::JsonPathError> {
//! let store = json!({
//!     "book": [
//!         {"title": "A", "price": 8},
//!         {"title": "B", "price": 20}
//!     ]
//! });
//! let cheap = store.json_path("$.book[?@.price < 10].title")?;
//! assert_eq!(cheap.all(), vec![&json!("A")]);
//! # Ok(())
//! # }
//! ```
//!
//! Custom function extensions are registered on a [`QueryContext`] and
//! are visible to both the parser (name resolution, arity and type
//! checks) and the evaluator:
//!
//! ```rust
//! use jpq::functions::{FunctionExtension, FunctionType, TypedValue};
//! use jpq::{parse_query_with, evaluate_query_with, QueryContext};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), jpq::JsonPathError> {
//! let ctx = QueryContext::new().with_function(FunctionExtension::new(
//!     "first",
//!     vec![FunctionType::NodesType],
//!     FunctionType::ValueType,
//!     |args| match args {
//!         [TypedValue::Nodes(nodes)] => TypedValue::Value(nodes.first().cloned()),
//!         _ => TypedValue::nothing(),
//!     },
//! ));
//! let doc = json!({"a": [[1, 2], [3]]});
//! let query = parse_query_with("$.a[?first(@.*) == 3]", &ctx)?;
//! assert_eq!(evaluate_query_with(&query, &doc, &ctx).all(), vec![&json!([3])]);
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod context;
pub mod error;
pub mod eval;
pub mod format;
pub mod functions;
pub mod parser;

mod json;

pub use self::ast::{ComparisonOp, FilterExpression, FunctionCall, Query, Segment, Selector, SubQueryKind};
pub use self::context::{QueryContext, QueryScope};
pub use self::error::{ErrorKind, JsonPathError, JsonPathResult};
pub use self::eval::{evaluate_query, evaluate_query_with, NodeList};
pub use self::format::{format_expression, format_query, format_segment, format_selector};
pub use self::functions::{intrinsics, FunctionExtension, FunctionType, TypedValue};
pub use self::parser::{
    parse_expression, parse_expression_with, parse_implicit_query, parse_implicit_query_with,
    parse_query, parse_query_with, parse_segment, parse_segment_with, parse_selector,
    parse_selector_with, try_parse_expression, try_parse_expression_with,
    try_parse_implicit_query, try_parse_implicit_query_with, try_parse_query,
    try_parse_query_with, try_parse_segment, try_parse_segment_with, try_parse_selector,
    try_parse_selector_with,
};

use serde_json::Value;

impl Query {
    /// Evaluate this query against `root` with the intrinsic functions
    #[must_use]
    pub fn evaluate<'a>(&self, root: &'a Value) -> NodeList<'a> {
        evaluate_query(self, root)
    }

    /// Evaluate this query against `root` under `context`
    #[must_use]
    pub fn evaluate_with<'a>(&self, root: &'a Value, context: &'a QueryContext) -> NodeList<'a> {
        evaluate_query_with(self, root, context)
    }
}

/// Parse and evaluate a query in one step
pub fn query<'a>(path: &str, root: &'a Value) -> JsonPathResult<NodeList<'a>> {
    Ok(parse_query(path)?.evaluate(root))
}

/// Parse and evaluate a query under `context`
pub fn query_with<'a>(
    path: &str,
    root: &'a Value,
    context: &'a QueryContext,
) -> JsonPathResult<NodeList<'a>> {
    Ok(parse_query_with(path, context)?.evaluate_with(root, context))
}

/// Extension trait running JSONPath queries directly on a
/// [`serde_json::Value`]
pub trait JsonPathExt {
    /// Query this value with a JSONPath string
    fn json_path(&self, path: &str) -> JsonPathResult<NodeList<'_>>;
}

impl JsonPathExt for Value {
    fn json_path(&self, path: &str) -> JsonPathResult<NodeList<'_>> {
        query(path, self)
    }
}
