//! Canonical query printing
//!
//! Every AST type implements `Display`; the printed form round-trips
//! through the parser and is idempotent under it. Child segments with a
//! single name or wildcard selector print in shorthand; names in bracket
//! position print single-quoted; expression operands are parenthesized
//! only when their precedence is strictly below the minimum their position
//! requires.

use std::fmt;
use std::fmt::Display as _;

use serde_json::Value;

use crate::ast::{ComparisonOp, FilterExpression, Query, Segment, Selector, SubQueryKind};
use crate::parser::is_shorthand_name;

/// Canonical string form of a query
#[must_use]
pub fn format_query(query: &Query) -> String {
    query.to_string()
}

/// Canonical string form of a segment
#[must_use]
pub fn format_segment(segment: &Segment) -> String {
    segment.to_string()
}

/// Canonical string form of a selector
#[must_use]
pub fn format_selector(selector: &Selector) -> String {
    selector.to_string()
}

/// Canonical string form of a filter expression
#[must_use]
pub fn format_expression(expression: &FilterExpression) -> String {
    expression.to_string()
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            segment.fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (selectors, dots) = match self {
            Segment::Child { selectors } => (selectors, "."),
            Segment::Descendant { selectors } => (selectors, ".."),
        };
        match selectors.as_slice() {
            [Selector::Name(name)] if is_shorthand_name(name) => {
                return write!(f, "{dots}{name}");
            }
            [Selector::Wildcard] => return write!(f, "{dots}*"),
            _ => {}
        }
        if matches!(self, Segment::Descendant { .. }) {
            f.write_str("..")?;
        }
        f.write_str("[")?;
        for (i, selector) in selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            selector.fmt(f)?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Name(name) => write_quoted(f, name),
            Selector::Wildcard => f.write_str("*"),
            Selector::Index(index) => write!(f, "{index}"),
            Selector::Slice { start, end, step } => {
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                f.write_str(":")?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                if let Some(step) = step {
                    write!(f, ":{step}")?;
                }
                Ok(())
            }
            Selector::Filter(expr) => {
                f.write_str("?")?;
                write_expression(f, expr, 1)
            }
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expression(f, self, 1)
    }
}

/// Precedence ladder: `||` 1, `&&` 2, comparison 3, `!` 4, atoms 5
fn precedence(expr: &FilterExpression) -> u8 {
    match expr {
        FilterExpression::Or(_) => 1,
        FilterExpression::And(_) => 2,
        FilterExpression::Comparison { .. } => 3,
        FilterExpression::Not(_) => 4,
        _ => 5,
    }
}

fn write_expression(
    f: &mut fmt::Formatter<'_>,
    expr: &FilterExpression,
    min_precedence: u8,
) -> fmt::Result {
    if precedence(expr) < min_precedence {
        f.write_str("(")?;
        write_expression(f, expr, 1)?;
        return f.write_str(")");
    }
    match expr {
        FilterExpression::Or(operands) => write_operands(f, operands, " || ", 2),
        FilterExpression::And(operands) => write_operands(f, operands, " && ", 3),
        FilterExpression::Comparison { left, op, right } => {
            write_expression(f, left, 4)?;
            write!(f, " {op} ")?;
            write_expression(f, right, 4)
        }
        FilterExpression::Not(operand) => {
            f.write_str("!")?;
            write_expression(f, operand, 5)
        }
        FilterExpression::SubQuery { kind, segments } => {
            f.write_str(match kind {
                SubQueryKind::Root => "$",
                SubQueryKind::Current => "@",
            })?;
            for segment in segments {
                segment.fmt(f)?;
            }
            Ok(())
        }
        FilterExpression::Literal(value) => write_literal(f, value),
        FilterExpression::Function(call) => {
            write!(f, "{}(", call.extension.name())?;
            for (i, arg) in call.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_expression(f, arg, 1)?;
            }
            f.write_str(")")
        }
    }
}

fn write_operands(
    f: &mut fmt::Formatter<'_>,
    operands: &[FilterExpression],
    separator: &str,
    min_precedence: u8,
) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write_expression(f, operand, min_precedence)?;
    }
    Ok(())
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => write_quoted(f, s),
        // Numbers, booleans, and null in JSON canonical form
        other => write!(f, "{other}"),
    }
}

/// Single-quoted string form, escaping exactly what the parser accepts
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\u{0008}' => f.write_str("\\b")?,
            '\u{000C}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_str(c.encode_utf8(&mut [0; 4]))?,
        }
    }
    f.write_str("'")
}
