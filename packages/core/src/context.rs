//! Query context: function registry and query-argument override
//!
//! A `QueryContext` is shared between the parser (function name resolution
//! and type checking) and the evaluator (dispatch, `$` rebinding). Contexts
//! are built once and read during parse/evaluation; concurrent evaluations
//! should each borrow the same immutable context freely.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::functions::{intrinsics, FunctionExtension};

/// Position the parser is currently typing a filter expression for
///
/// Inside a function argument the test-expression rule is suspended;
/// per-parameter typing re-asserts the correct rule instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryScope {
    /// The body of a filter selector
    Expression,
    /// One argument of a function call
    Argument,
}

/// Shared environment for parsing and evaluating queries
#[derive(Debug)]
pub struct QueryContext {
    functions: HashMap<String, Arc<FunctionExtension>>,
    query_argument: Option<Value>,
}

impl QueryContext {
    /// Context with the intrinsic functions only
    #[must_use]
    pub fn new() -> Self {
        let mut functions = HashMap::new();
        for ext in intrinsics() {
            functions.insert(ext.name().to_string(), ext);
        }
        Self {
            functions,
            query_argument: None,
        }
    }

    /// Register one extension, layered over the intrinsics by name
    #[must_use]
    pub fn with_function(mut self, extension: FunctionExtension) -> Self {
        self.functions
            .insert(extension.name().to_string(), Arc::new(extension));
        self
    }

    /// Register several extensions, merged by name
    #[must_use]
    pub fn with_functions(
        mut self,
        extensions: impl IntoIterator<Item = FunctionExtension>,
    ) -> Self {
        for extension in extensions {
            self.functions
                .insert(extension.name().to_string(), Arc::new(extension));
        }
        self
    }

    /// Override the root bound to embedded `$` sub-queries
    ///
    /// Defaults to the evaluation root when unset.
    #[must_use]
    pub fn with_query_argument(mut self, value: Value) -> Self {
        self.query_argument = Some(value);
        self
    }

    /// Look up an extension by name
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Arc<FunctionExtension>> {
        self.functions.get(name)
    }

    /// The configured `$` override, if any
    #[must_use]
    pub fn query_argument(&self) -> Option<&Value> {
        self.query_argument.as_ref()
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_CONTEXT: QueryContext = QueryContext::new();
}

/// The shared intrinsics-only context used by the plain entry points
pub(crate) fn default_context() -> &'static QueryContext {
    &DEFAULT_CONTEXT
}
