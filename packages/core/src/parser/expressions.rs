//! Filter expression parsing and static type checking
//!
//! Precedence climbing, lowest to highest: `||`, `&&`, comparison
//! (non-associative), unary `!`, atoms. The parser is the gatekeeper for
//! the Value/Logical/Nodes typing rules: comparison operands must produce
//! a value, test positions must not, and function arguments are checked
//! against the declared parameter types of the resolved extension.

use std::sync::Arc;

use serde_json::Value;

use super::core::Parser;
use crate::ast::{is_singular_segments, ComparisonOp, FilterExpression, FunctionCall, SubQueryKind};
use crate::context::QueryScope;
use crate::error::{
    arity_mismatch_error, type_mismatch_error, unknown_function_error, JsonPathResult,
};
use crate::functions::{FunctionExtension, FunctionType};

impl<'a> Parser<'a> {
    /// Parse the body of a filter selector, positioned after `?`
    pub(crate) fn parse_filter_body(&mut self) -> JsonPathResult<FilterExpression> {
        let saved = self.scope;
        self.scope = QueryScope::Expression;
        let result = self.parse_logical_expr();
        self.scope = saved;
        result
    }

    /// Parse a complete logical expression
    ///
    /// In `Expression` scope the result must be a valid test expression;
    /// in `Argument` scope that rule is suspended and per-parameter typing
    /// applies instead.
    pub(crate) fn parse_logical_expr(&mut self) -> JsonPathResult<FilterExpression> {
        let start = self.offset;
        let expr = self.parse_or()?;
        if self.scope == QueryScope::Expression {
            self.validate_test_expression(&expr, start)?;
        }
        Ok(expr)
    }

    fn parse_or(&mut self) -> JsonPathResult<FilterExpression> {
        let first_start = self.offset;
        let first = self.parse_and()?;
        let mut operands = vec![first];
        loop {
            let mark = self.offset;
            self.skip_blanks();
            if self.peek() == Some(b'|') && self.peek_at(1) == Some(b'|') {
                if operands.len() == 1 {
                    self.validate_test_expression(&operands[0], first_start)?;
                }
                self.offset += 2;
                self.skip_blanks();
                let operand_start = self.offset;
                let operand = self.parse_and()?;
                self.validate_test_expression(&operand, operand_start)?;
                operands.push(operand);
            } else {
                self.offset = mark;
                break;
            }
        }
        if operands.len() > 1 {
            Ok(FilterExpression::Or(operands))
        } else {
            Ok(operands.swap_remove(0))
        }
    }

    fn parse_and(&mut self) -> JsonPathResult<FilterExpression> {
        let first_start = self.offset;
        let first = self.parse_comparison()?;
        let mut operands = vec![first];
        loop {
            let mark = self.offset;
            self.skip_blanks();
            if self.peek() == Some(b'&') && self.peek_at(1) == Some(b'&') {
                if operands.len() == 1 {
                    self.validate_test_expression(&operands[0], first_start)?;
                }
                self.offset += 2;
                self.skip_blanks();
                let operand_start = self.offset;
                let operand = self.parse_comparison()?;
                self.validate_test_expression(&operand, operand_start)?;
                operands.push(operand);
            } else {
                self.offset = mark;
                break;
            }
        }
        if operands.len() > 1 {
            Ok(FilterExpression::And(operands))
        } else {
            Ok(operands.swap_remove(0))
        }
    }

    /// Comparison is non-associative: at most one operator at this level
    fn parse_comparison(&mut self) -> JsonPathResult<FilterExpression> {
        let left_start = self.offset;
        let left = self.parse_basic()?;
        let mark = self.offset;
        self.skip_blanks();
        match self.scan_comparison_op() {
            Some(op) => {
                self.validate_comparable(&left, left_start)?;
                self.skip_blanks();
                let right_start = self.offset;
                let right = self.parse_basic()?;
                self.validate_comparable(&right, right_start)?;
                Ok(FilterExpression::comparison(left, op, right))
            }
            None => {
                self.offset = mark;
                Ok(left)
            }
        }
    }

    fn scan_comparison_op(&mut self) -> Option<ComparisonOp> {
        let (op, len) = match (self.peek()?, self.peek_at(1)) {
            (b'=', Some(b'=')) => (ComparisonOp::Equal, 2),
            (b'!', Some(b'=')) => (ComparisonOp::NotEqual, 2),
            (b'<', Some(b'=')) => (ComparisonOp::LessEq, 2),
            (b'>', Some(b'=')) => (ComparisonOp::GreaterEq, 2),
            (b'<', _) => (ComparisonOp::Less, 1),
            (b'>', _) => (ComparisonOp::Greater, 1),
            _ => return None,
        };
        self.offset += len;
        Some(op)
    }

    /// Unary level: `!` applies to a test expression
    fn parse_basic(&mut self) -> JsonPathResult<FilterExpression> {
        if self.peek() == Some(b'!') && self.peek_at(1) != Some(b'=') {
            self.bump();
            self.skip_blanks();
            let operand_start = self.offset;
            let operand = self.parse_basic()?;
            self.validate_test_expression(&operand, operand_start)?;
            return Ok(FilterExpression::not(operand));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> JsonPathResult<FilterExpression> {
        match self.peek() {
            Some(b'(') => {
                self.bump();
                self.skip_blanks();
                let inner_start = self.offset;
                let inner = self.parse_or()?;
                self.validate_test_expression(&inner, inner_start)?;
                self.skip_blanks();
                self.expect(b')', "expected ')'")?;
                Ok(inner)
            }
            Some(b'@') => {
                self.bump();
                Ok(FilterExpression::SubQuery {
                    kind: SubQueryKind::Current,
                    segments: self.parse_segments()?,
                })
            }
            Some(b'$') => {
                self.bump();
                Ok(FilterExpression::SubQuery {
                    kind: SubQueryKind::Root,
                    segments: self.parse_segments()?,
                })
            }
            Some(b'\'' | b'"') => Ok(FilterExpression::Literal(Value::String(
                self.parse_string_literal()?,
            ))),
            Some(c) if c == b'-' || c.is_ascii_digit() => Ok(FilterExpression::Literal(
                Value::Number(self.parse_number_literal()?),
            )),
            Some(c) if c.is_ascii_lowercase() => self.parse_name_atom(),
            _ => Err(self.error("expected a filter expression")),
        }
    }

    /// Keyword literal (`true`, `false`, `null`) or function call
    fn parse_name_atom(&mut self) -> JsonPathResult<FilterExpression> {
        let input: &'a str = self.input;
        let start = self.offset;
        while matches!(self.peek(), Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'_')
        {
            self.bump();
        }
        let name = &input[start..self.offset];
        match name {
            "true" => return Ok(FilterExpression::Literal(Value::Bool(true))),
            "false" => return Ok(FilterExpression::Literal(Value::Bool(false))),
            "null" => return Ok(FilterExpression::Literal(Value::Null)),
            _ => {}
        }
        if self.peek() != Some(b'(') {
            return Err(self.error_at(format!("unexpected identifier '{name}'"), start));
        }
        let extension = match self.context.function(name) {
            Some(ext) => Arc::clone(ext),
            None => return Err(unknown_function_error(input, name, start)),
        };
        self.bump(); // '('
        self.parse_function_call(start, extension)
    }

    /// Parse arguments and apply arity and parameter-type checks
    fn parse_function_call(
        &mut self,
        name_start: usize,
        extension: Arc<FunctionExtension>,
    ) -> JsonPathResult<FilterExpression> {
        let mut args = Vec::new();
        let mut arg_starts = Vec::new();
        self.skip_blanks();
        if self.peek() != Some(b')') {
            loop {
                arg_starts.push(self.offset);
                let saved = self.scope;
                self.scope = QueryScope::Argument;
                let parsed = self.parse_logical_expr();
                self.scope = saved;
                args.push(parsed?);
                self.skip_blanks();
                if self.eat(b',') {
                    self.skip_blanks();
                } else {
                    break;
                }
            }
        }
        self.expect(b')', "expected ')' after function arguments")?;

        let expected = extension.parameter_types().len();
        if args.len() != expected {
            return Err(arity_mismatch_error(
                self.input,
                extension.name(),
                expected,
                args.len(),
                name_start,
            ));
        }
        for ((arg, param), offset) in args
            .iter()
            .zip(extension.parameter_types())
            .zip(&arg_starts)
        {
            self.validate_function_argument(extension.name(), arg, *param, *offset)?;
        }
        Ok(FilterExpression::Function(FunctionCall { extension, args }))
    }

    /// A test position accepts anything that yields a boolean: queries,
    /// comparisons, logical combinations, and Logical- or Nodes-returning
    /// functions. Literals and Value-returning functions are rejected.
    fn validate_test_expression(
        &self,
        expr: &FilterExpression,
        offset: usize,
    ) -> JsonPathResult<()> {
        match expr {
            FilterExpression::Literal(_) => Err(type_mismatch_error(
                self.input,
                "literal value cannot be used as a test expression",
                Some(offset),
            )),
            FilterExpression::Function(call)
                if call.extension.result_type() == FunctionType::ValueType =>
            {
                Err(type_mismatch_error(
                    self.input,
                    format!(
                        "function '{}' returns a value and must be compared",
                        call.extension.name()
                    ),
                    Some(offset),
                ))
            }
            _ => Ok(()),
        }
    }

    /// A comparison operand must produce a single value: a literal, a
    /// singular query, or a Value-returning function.
    fn validate_comparable(&self, expr: &FilterExpression, offset: usize) -> JsonPathResult<()> {
        match expr {
            FilterExpression::Literal(_) => Ok(()),
            FilterExpression::SubQuery { segments, .. } => {
                if is_singular_segments(segments) {
                    Ok(())
                } else {
                    Err(type_mismatch_error(
                        self.input,
                        "only singular queries can be compared",
                        Some(offset),
                    ))
                }
            }
            FilterExpression::Function(call) => {
                if call.extension.result_type() == FunctionType::ValueType {
                    Ok(())
                } else {
                    Err(type_mismatch_error(
                        self.input,
                        format!(
                            "function '{}' does not return a value and cannot be compared",
                            call.extension.name()
                        ),
                        Some(offset),
                    ))
                }
            }
            _ => Err(type_mismatch_error(
                self.input,
                "expression is not comparable",
                Some(offset),
            )),
        }
    }

    fn validate_function_argument(
        &self,
        function: &str,
        arg: &FilterExpression,
        param: FunctionType,
        offset: usize,
    ) -> JsonPathResult<()> {
        match param {
            FunctionType::ValueType => match arg {
                FilterExpression::Literal(_) => Ok(()),
                FilterExpression::SubQuery { segments, .. } => {
                    if is_singular_segments(segments) {
                        Ok(())
                    } else {
                        Err(type_mismatch_error(
                            self.input,
                            format!("argument to '{function}' must be a singular query"),
                            Some(offset),
                        ))
                    }
                }
                FilterExpression::Function(call)
                    if call.extension.result_type() == FunctionType::ValueType =>
                {
                    Ok(())
                }
                _ => Err(type_mismatch_error(
                    self.input,
                    format!("argument to '{function}' must produce a single value"),
                    Some(offset),
                )),
            },
            FunctionType::LogicalType => match arg {
                FilterExpression::Literal(_) => Err(type_mismatch_error(
                    self.input,
                    format!("argument to '{function}' must be a logical expression"),
                    Some(offset),
                )),
                FilterExpression::Function(call)
                    if call.extension.result_type() == FunctionType::ValueType =>
                {
                    Err(type_mismatch_error(
                        self.input,
                        format!("argument to '{function}' must be a logical expression"),
                        Some(offset),
                    ))
                }
                _ => Ok(()),
            },
            FunctionType::NodesType => match arg {
                FilterExpression::SubQuery { .. } => Ok(()),
                FilterExpression::Function(call)
                    if call.extension.result_type() == FunctionType::NodesType =>
                {
                    Ok(())
                }
                _ => Err(type_mismatch_error(
                    self.input,
                    format!("argument to '{function}' must be a query or a nodelist"),
                    Some(offset),
                )),
            },
        }
    }
}
