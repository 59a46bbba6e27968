//! JSONPath error types
//!
//! A single error type covers both parse failures and the (rare) evaluation
//! failures. Parse errors carry the original input and the byte offset at
//! which scanning stopped.

use std::error::Error;
use std::fmt;

/// JSONPath processing error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed query syntax
    InvalidExpression,
    /// Function name not present in the context registry
    UnknownFunction,
    /// Filter expression violates the Value/Logical/Nodes typing rules
    TypeMismatch,
    /// Function call arity does not match the registered signature
    ArityMismatch,
    /// Failure during evaluation of a well-formed query
    Evaluation,
}

/// Main JSONPath error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPathError {
    pub kind: ErrorKind,
    pub message: String,
    /// The input string being parsed, when the error arose from parsing
    pub input: Option<String>,
    /// Byte offset into `input` at which the failure was detected
    pub offset: Option<usize>,
}

impl fmt::Display for JsonPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " at position {offset}")?;
        }
        if let Some(input) = &self.input {
            write!(f, " in {input:?}")?;
        }
        Ok(())
    }
}

impl Error for JsonPathError {}

/// Result type for JSONPath operations
pub type JsonPathResult<T> = Result<T, JsonPathError>;

impl JsonPathError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            message,
            input: None,
            offset: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, input: &str, offset: usize) -> Self {
        self.input = Some(input.to_string());
        self.offset = Some(offset);
        self
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Evaluation, msg.into())
    }
}

/// Build a syntax error pointing into the parsed input
pub fn invalid_expression_error(
    input: &str,
    msg: impl Into<String>,
    offset: Option<usize>,
) -> JsonPathError {
    rejection(ErrorKind::InvalidExpression, msg.into(), input, offset)
}

/// Build an unknown-function error pointing at the function name
pub fn unknown_function_error(input: &str, name: &str, offset: usize) -> JsonPathError {
    rejection(
        ErrorKind::UnknownFunction,
        format!("unknown function '{name}'"),
        input,
        Some(offset),
    )
}

/// Build a filter-typing error pointing into the parsed input
pub fn type_mismatch_error(
    input: &str,
    msg: impl Into<String>,
    offset: Option<usize>,
) -> JsonPathError {
    rejection(ErrorKind::TypeMismatch, msg.into(), input, offset)
}

/// Build an arity error for a function call
pub fn arity_mismatch_error(
    input: &str,
    name: &str,
    expected: usize,
    found: usize,
    offset: usize,
) -> JsonPathError {
    rejection(
        ErrorKind::ArityMismatch,
        format!("{name}() expects {expected} argument(s), found {found}"),
        input,
        Some(offset),
    )
}

/// Build a parse rejection carrying the `{input, offset}` pair, emitting
/// the debug diagnostic for the rejection path
fn rejection(kind: ErrorKind, message: String, input: &str, offset: Option<usize>) -> JsonPathError {
    match offset {
        Some(offset) => log::debug!("rejecting {input:?} at position {offset}: {message}"),
        None => log::debug!("rejecting {input:?}: {message}"),
    }
    JsonPathError {
        kind,
        message,
        input: Some(input.to_string()),
        offset,
    }
}
