//! RFC 9535 query parser
//!
//! Recursive descent over a byte-indexed buffer, performing both syntax
//! checking against the RFC grammar and static typing of filter
//! expressions (see [`crate::functions::FunctionType`]). Entry points come
//! in paired forms: plain (intrinsic functions only) and `*_with` taking a
//! [`QueryContext`] whose registry resolves function names at parse time.
//! `try_*` variants map failure to `None`.

mod core;
mod expressions;
mod numbers;
mod segments;
mod selectors;
mod strings;

pub(crate) use self::core::{is_name_first, is_shorthand_name};

use self::core::Parser;
use crate::ast::{FilterExpression, Query, Segment, Selector};
use crate::context::{default_context, QueryContext};
use crate::error::JsonPathResult;

/// Parse a complete query; the input must begin with `$` and be fully
/// consumed.
pub fn parse_query(input: &str) -> JsonPathResult<Query> {
    parse_query_with(input, default_context())
}

/// [`parse_query`] resolving function names against `context`
pub fn parse_query_with(input: &str, context: &QueryContext) -> JsonPathResult<Query> {
    let mut parser = Parser::new(input, context);
    parser.expect(b'$', "query must begin with '$'")?;
    let segments = parser.parse_segments()?;
    parser.expect_end()?;
    Ok(Query { segments })
}

/// Parse a query with an optional leading `$`
///
/// Without the root identifier, a leading wildcard or shorthand name is
/// taken as the first child segment: `a.b` parses as `$.a.b`.
pub fn parse_implicit_query(input: &str) -> JsonPathResult<Query> {
    parse_implicit_query_with(input, default_context())
}

/// [`parse_implicit_query`] resolving function names against `context`
pub fn parse_implicit_query_with(input: &str, context: &QueryContext) -> JsonPathResult<Query> {
    let mut parser = Parser::new(input, context);
    let mut segments = Vec::new();
    if !parser.eat(b'$') {
        match parser.peek_char() {
            Some('*') => {
                parser.bump();
                segments.push(Segment::Child {
                    selectors: vec![Selector::Wildcard],
                });
            }
            Some(c) if is_name_first(c) => {
                let name = parser.parse_shorthand_name()?;
                segments.push(Segment::Child {
                    selectors: vec![Selector::Name(name)],
                });
            }
            _ => {}
        }
    }
    segments.extend(parser.parse_segments()?);
    parser.expect_end()?;
    Ok(Query { segments })
}

/// Parse a single segment (`.name`, `..name`, `[...]`, `..[...]`)
pub fn parse_segment(input: &str) -> JsonPathResult<Segment> {
    parse_segment_with(input, default_context())
}

/// [`parse_segment`] resolving function names against `context`
pub fn parse_segment_with(input: &str, context: &QueryContext) -> JsonPathResult<Segment> {
    let mut parser = Parser::new(input, context);
    let segment = parser.parse_segment()?;
    parser.expect_end()?;
    Ok(segment)
}

/// Parse a single selector as it would appear inside brackets
pub fn parse_selector(input: &str) -> JsonPathResult<Selector> {
    parse_selector_with(input, default_context())
}

/// [`parse_selector`] resolving function names against `context`
pub fn parse_selector_with(input: &str, context: &QueryContext) -> JsonPathResult<Selector> {
    let mut parser = Parser::new(input, context);
    let selector = parser.parse_selector()?;
    parser.expect_end()?;
    Ok(selector)
}

/// Parse a filter expression as it would appear after `?`
pub fn parse_expression(input: &str) -> JsonPathResult<FilterExpression> {
    parse_expression_with(input, default_context())
}

/// [`parse_expression`] resolving function names against `context`
pub fn parse_expression_with(
    input: &str,
    context: &QueryContext,
) -> JsonPathResult<FilterExpression> {
    let mut parser = Parser::new(input, context);
    let expression = parser.parse_logical_expr()?;
    parser.expect_end()?;
    Ok(expression)
}

/// [`parse_query`], mapping failure to `None`
#[must_use]
pub fn try_parse_query(input: &str) -> Option<Query> {
    parse_query(input).ok()
}

/// [`parse_query_with`], mapping failure to `None`
#[must_use]
pub fn try_parse_query_with(input: &str, context: &QueryContext) -> Option<Query> {
    parse_query_with(input, context).ok()
}

/// [`parse_implicit_query`], mapping failure to `None`
#[must_use]
pub fn try_parse_implicit_query(input: &str) -> Option<Query> {
    parse_implicit_query(input).ok()
}

/// [`parse_implicit_query_with`], mapping failure to `None`
#[must_use]
pub fn try_parse_implicit_query_with(input: &str, context: &QueryContext) -> Option<Query> {
    parse_implicit_query_with(input, context).ok()
}

/// [`parse_segment`], mapping failure to `None`
#[must_use]
pub fn try_parse_segment(input: &str) -> Option<Segment> {
    parse_segment(input).ok()
}

/// [`parse_segment_with`], mapping failure to `None`
#[must_use]
pub fn try_parse_segment_with(input: &str, context: &QueryContext) -> Option<Segment> {
    parse_segment_with(input, context).ok()
}

/// [`parse_selector`], mapping failure to `None`
#[must_use]
pub fn try_parse_selector(input: &str) -> Option<Selector> {
    parse_selector(input).ok()
}

/// [`parse_selector_with`], mapping failure to `None`
#[must_use]
pub fn try_parse_selector_with(input: &str, context: &QueryContext) -> Option<Selector> {
    parse_selector_with(input, context).ok()
}

/// [`parse_expression`], mapping failure to `None`
#[must_use]
pub fn try_parse_expression(input: &str) -> Option<FilterExpression> {
    parse_expression(input).ok()
}

/// [`parse_expression_with`], mapping failure to `None`
#[must_use]
pub fn try_parse_expression_with(input: &str, context: &QueryContext) -> Option<FilterExpression> {
    parse_expression_with(input, context).ok()
}
