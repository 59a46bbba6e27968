//! Query evaluation
//!
//! A tree walk over the AST, pure with respect to the JSON argument.
//! Traversal borrows nodes from the root value; results come back as a
//! [`NodeList`] preserving order and duplicates. Embedded `$` sub-queries
//! inside filters resolve against the scope's root binding, `@` against
//! the current filter node, so rebinding needs no mutable state and is
//! trivially restored on every return path.

mod filter;
mod selectors;

use serde::Serialize;
use serde_json::Value;

use crate::ast::{Query, Segment};
use crate::context::{default_context, QueryContext};
use crate::json;

/// Ordered, duplicate-preserving sequence of nodes produced by a query
///
/// Nodes are borrowed from the queried value.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NodeList<'a> {
    nodes: Vec<&'a Value>,
}

impl<'a> NodeList<'a> {
    /// All nodes, in query order
    #[must_use]
    pub fn all(self) -> Vec<&'a Value> {
        self.nodes
    }

    /// Exactly one node, for queries expected to be singular
    ///
    /// `None` when the list is empty or holds several nodes.
    #[must_use]
    pub fn one(self) -> Option<&'a Value> {
        if self.nodes.len() == 1 {
            self.nodes.first().copied()
        } else {
            None
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&'a Value> {
        self.nodes.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<&'a Value> {
        self.nodes.last().copied()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.nodes.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, &'a Value> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for NodeList<'a> {
    type Item = &'a Value;
    type IntoIter = std::vec::IntoIter<&'a Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, 'b> IntoIterator for &'b NodeList<'a> {
    type Item = &'b &'a Value;
    type IntoIter = std::slice::Iter<'b, &'a Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Bindings threaded through a single evaluation
///
/// Holding the `$` binding by reference makes nested rebinding automatic:
/// an embedded `@` query walks from the current node, an embedded `$`
/// query from `root`, and both restore on return by construction.
pub(crate) struct EvalScope<'a> {
    /// The value `$` denotes, including inside embedded sub-queries
    pub(crate) root: &'a Value,
}

/// Evaluate a query against `root` with the intrinsic functions
#[must_use]
pub fn evaluate_query<'a>(query: &Query, root: &'a Value) -> NodeList<'a> {
    evaluate_query_with(query, root, default_context())
}

/// Evaluate a query against `root` under `context`
///
/// The context's query-argument override, when set, rebinds embedded `$`
/// sub-queries; the top-level walk always starts at `root`.
#[must_use]
pub fn evaluate_query_with<'a>(
    query: &Query,
    root: &'a Value,
    context: &'a QueryContext,
) -> NodeList<'a> {
    let scope = EvalScope {
        root: context.query_argument().unwrap_or(root),
    };
    let mut nodes: Vec<&Value> = vec![root];
    for segment in &query.segments {
        nodes = evaluate_segment(segment, &nodes, &scope);
    }
    NodeList { nodes }
}

/// Apply one segment to a nodelist, producing the next nodelist
pub(crate) fn evaluate_segment<'a>(
    segment: &Segment,
    input: &[&'a Value],
    scope: &EvalScope<'a>,
) -> Vec<&'a Value> {
    let mut out = Vec::new();
    match segment {
        Segment::Child { selectors } => {
            // Selector-major order: all matches of the first selector
            // across the input precede any match of the second.
            for selector in selectors {
                for &node in input {
                    selectors::evaluate_selector(selector, node, scope, &mut out);
                }
            }
        }
        Segment::Descendant { selectors } => {
            if selectors.is_empty() {
                return out;
            }
            for &node in input {
                for selector in selectors {
                    selectors::evaluate_selector(selector, node, scope, &mut out);
                }
                let mut descendants = Vec::new();
                json::descendants(node, &mut descendants);
                for descendant in descendants {
                    for selector in selectors {
                        selectors::evaluate_selector(selector, descendant, scope, &mut out);
                    }
                }
            }
        }
    }
    out
}
