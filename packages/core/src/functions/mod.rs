//! Function extension type system and intrinsic functions
//!
//! Implements the RFC 9535 function type system: the three declared types
//! (`ValueType`, `LogicalType`, `NodesType`), the runtime values carrying
//! them, and the extension records the parser resolves calls against. The
//! five intrinsics (`length`, `count`, `match`, `search`, `value`) are
//! pre-registered in every context.

mod count;
mod length;
mod regex_functions;
mod value;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// RFC 9535 function expression type system
///
/// Declared types used for static checking of comparisons, test
/// expressions, and function arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionType {
    /// The type of any JSON value, or Nothing
    ValueType,
    /// The type of test and logical expression results
    LogicalType,
    /// The type of a nodelist
    NodesType,
}

/// Runtime value produced by function arguments and function results
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// A JSON value, or `None` for the special result Nothing
    ///
    /// Nothing is distinct from JSON `null`: it denotes the absence of a
    /// value, as produced by an empty singular query.
    Value(Option<Value>),
    /// A boolean test result
    Logical(bool),
    /// A nodelist, order-preserving and never deduplicated
    Nodes(Vec<Value>),
}

impl TypedValue {
    /// The special absent-value result
    #[must_use]
    pub fn nothing() -> Self {
        TypedValue::Value(None)
    }

    /// The declared type this runtime value inhabits
    #[must_use]
    pub fn kind(&self) -> FunctionType {
        match self {
            TypedValue::Value(_) => FunctionType::ValueType,
            TypedValue::Logical(_) => FunctionType::LogicalType,
            TypedValue::Nodes(_) => FunctionType::NodesType,
        }
    }
}

type FunctionImpl = Box<dyn Fn(&[TypedValue]) -> TypedValue + Send + Sync>;

/// A registered function extension
///
/// Visible to the parser (name resolution, arity and type checking) and to
/// the evaluator (dispatch). `evaluate` must return a value whose runtime
/// kind matches `result_type`.
pub struct FunctionExtension {
    name: String,
    parameter_types: Vec<FunctionType>,
    result_type: FunctionType,
    evaluate: FunctionImpl,
}

impl FunctionExtension {
    pub fn new(
        name: impl Into<String>,
        parameter_types: Vec<FunctionType>,
        result_type: FunctionType,
        evaluate: impl Fn(&[TypedValue]) -> TypedValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_types,
            result_type,
            evaluate: Box::new(evaluate),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parameter_types(&self) -> &[FunctionType] {
        &self.parameter_types
    }

    #[must_use]
    pub fn result_type(&self) -> FunctionType {
        self.result_type
    }

    /// Apply the extension to already-evaluated arguments
    #[must_use]
    pub fn call(&self, args: &[TypedValue]) -> TypedValue {
        (self.evaluate)(args)
    }
}

impl fmt::Debug for FunctionExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionExtension")
            .field("name", &self.name)
            .field("parameter_types", &self.parameter_types)
            .field("result_type", &self.result_type)
            .finish_non_exhaustive()
    }
}

/// The five intrinsic extensions pre-registered in every context
#[must_use]
pub fn intrinsics() -> Vec<Arc<FunctionExtension>> {
    vec![
        Arc::new(FunctionExtension::new(
            "length",
            vec![FunctionType::ValueType],
            FunctionType::ValueType,
            length::evaluate,
        )),
        Arc::new(FunctionExtension::new(
            "count",
            vec![FunctionType::NodesType],
            FunctionType::ValueType,
            count::evaluate,
        )),
        Arc::new(FunctionExtension::new(
            "match",
            vec![FunctionType::ValueType, FunctionType::ValueType],
            FunctionType::LogicalType,
            regex_functions::evaluate_match,
        )),
        Arc::new(FunctionExtension::new(
            "search",
            vec![FunctionType::ValueType, FunctionType::ValueType],
            FunctionType::LogicalType,
            regex_functions::evaluate_search,
        )),
        Arc::new(FunctionExtension::new(
            "value",
            vec![FunctionType::NodesType],
            FunctionType::ValueType,
            value::evaluate,
        )),
    ]
}
