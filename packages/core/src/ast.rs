//! JSONPath abstract syntax tree definitions
//!
//! Tagged trees for queries, segments, selectors, and filter expressions.
//! All nodes are immutable after construction; a `Query` owns its segments,
//! a `Segment` its selectors, and a filter `Selector` its expression tree.
//! Function expressions hold a shared reference to a registered
//! [`FunctionExtension`].

use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::functions::FunctionExtension;

/// A parsed JSONPath query: an ordered list of segments applied to `$`
///
/// An empty segment list is valid and selects the root alone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub segments: Vec<Segment>,
}

/// One segment of a query
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Child segment (`.name`, `.*`, or `[selectors]`)
    Child { selectors: Vec<Selector> },
    /// Descendant segment (`..name`, `..*`, or `..[selectors]`)
    Descendant { selectors: Vec<Selector> },
}

/// A single selector within a segment
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Member name selector (`'name'` or shorthand `.name`)
    Name(String),
    /// Wildcard selector (`*`)
    Wildcard,
    /// Array index selector; negative indices count from the end
    Index(i64),
    /// Array slice selector (`start:end:step`)
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    /// Filter selector (`?expr`)
    Filter(FilterExpression),
}

/// Root binding of a query embedded in a filter expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubQueryKind {
    /// `$`: the outermost query argument
    Root,
    /// `@`: the current filter node
    Current,
}

/// Comparison operators for filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// Equality comparison (==)
    Equal,
    /// Inequality comparison (!=)
    NotEqual,
    /// Less than comparison (<)
    Less,
    /// Less than or equal comparison (<=)
    LessEq,
    /// Greater than comparison (>)
    Greater,
    /// Greater than or equal comparison (>=)
    GreaterEq,
}

impl ComparisonOp {
    /// Operator spelling as it appears in query syntax
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Equal => "==",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::Less => "<",
            ComparisonOp::LessEq => "<=",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterEq => ">=",
        }
    }
}

/// Filter expression tree
///
/// `Or` and `And` are n-ary and hold at least two operands when produced by
/// the parser. Comparison operands are restricted by the parser to literals,
/// singular queries, and Value-returning functions.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// Logical disjunction (`a || b || ...`)
    Or(Vec<FilterExpression>),
    /// Logical conjunction (`a && b && ...`)
    And(Vec<FilterExpression>),
    /// Logical negation (`!a`)
    Not(Box<FilterExpression>),
    /// Comparison (`a == b`, `a < b`, ...)
    Comparison {
        left: Box<FilterExpression>,
        op: ComparisonOp,
        right: Box<FilterExpression>,
    },
    /// Embedded query rooted at `$` or `@`
    SubQuery {
        kind: SubQueryKind,
        segments: Vec<Segment>,
    },
    /// Literal value (string, number, boolean, or null)
    Literal(Value),
    /// Function extension call
    Function(FunctionCall),
}

/// A resolved call to a registered function extension
#[derive(Debug, Clone)]
pub struct FunctionCall {
    /// Shared, read-only reference into the context registry
    pub extension: Arc<FunctionExtension>,
    pub args: Vec<FilterExpression>,
}

impl PartialEq for FunctionCall {
    fn eq(&self, other: &Self) -> bool {
        // Extensions are unique by name within a registry
        self.extension.name() == other.extension.name() && self.args == other.args
    }
}

impl Query {
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// A query is singular iff every segment is a child segment whose single
    /// selector is a name or index, statically guaranteeing at most one node.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        is_singular_segments(&self.segments)
    }
}

/// Singularity over a raw segment list (shared with embedded sub-queries)
#[must_use]
pub(crate) fn is_singular_segments(segments: &[Segment]) -> bool {
    segments.iter().all(Segment::is_singular)
}

impl Segment {
    #[must_use]
    pub fn child(selectors: Vec<Selector>) -> Self {
        Segment::Child { selectors }
    }

    #[must_use]
    pub fn descendant(selectors: Vec<Selector>) -> Self {
        Segment::Descendant { selectors }
    }

    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        match self {
            Segment::Child { selectors } | Segment::Descendant { selectors } => selectors,
        }
    }

    #[must_use]
    pub fn is_singular(&self) -> bool {
        match self {
            Segment::Child { selectors } => {
                selectors.len() == 1 && selectors[0].is_singular()
            }
            Segment::Descendant { .. } => false,
        }
    }
}

impl Selector {
    pub fn name(name: impl Into<String>) -> Self {
        Selector::Name(name.into())
    }

    #[must_use]
    pub fn slice(start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Self {
        Selector::Slice { start, end, step }
    }

    #[must_use]
    pub fn filter(expr: FilterExpression) -> Self {
        Selector::Filter(expr)
    }

    #[must_use]
    pub fn is_singular(&self) -> bool {
        matches!(self, Selector::Name(_) | Selector::Index(_))
    }
}

impl FilterExpression {
    #[must_use]
    pub fn comparison(left: FilterExpression, op: ComparisonOp, right: FilterExpression) -> Self {
        FilterExpression::Comparison {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn not(operand: FilterExpression) -> Self {
        FilterExpression::Not(Box::new(operand))
    }

    #[must_use]
    pub fn sub_query(kind: SubQueryKind, segments: Vec<Segment>) -> Self {
        FilterExpression::SubQuery { kind, segments }
    }
}

// Queries serialize as their canonical string form and deserialize by
// parsing it, so ASTs survive config files and wire formats as plain text.
impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Query {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        crate::parser::parse_query(&s).map_err(D::Error::custom)
    }
}
