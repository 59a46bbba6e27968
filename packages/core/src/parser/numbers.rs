//! Integer and number literal scanning
//!
//! Indices and slice parts use the `int` rule: `0` or an optional minus
//! followed by a nonzero digit, no leading zeros, no negative zero, and
//! values confined to the I-JSON interoperable range. Number literals in
//! filter expressions additionally accept a fraction, an exponent, and
//! `-0` as the full integer part.

use serde_json::Number;

use super::core::Parser;
use crate::error::JsonPathResult;

/// 2^53 - 1, the I-JSON interoperable integer magnitude (RFC 9535 §2.1)
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

impl<'a> Parser<'a> {
    /// Scan an index or slice integer
    pub(crate) fn parse_int(&mut self) -> JsonPathResult<i64> {
        let start = self.offset;
        let negative = self.eat(b'-');
        let digits = self.scan_digits()?;
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(self.error_at("integers cannot have leading zeros", start));
        }
        if negative && digits == "0" {
            return Err(self.error_at("negative zero is not allowed", start));
        }
        let value: i64 = self.input[start..self.offset]
            .parse()
            .map_err(|_| self.error_at("integer out of interoperable range", start))?;
        if value.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
            return Err(self.error_at("integer out of interoperable range", start));
        }
        Ok(value)
    }

    /// Scan a filter number literal into a JSON number
    pub(crate) fn parse_number_literal(&mut self) -> JsonPathResult<Number> {
        let start = self.offset;
        self.eat(b'-');
        let int_digits = self.scan_digits()?;
        if int_digits.len() > 1 && int_digits.starts_with('0') {
            return Err(self.error_at("numbers cannot have leading zeros", start));
        }

        let mut is_integer = true;
        if self.peek() == Some(b'.') {
            is_integer = false;
            self.bump();
            self.scan_digits()
                .map_err(|_| self.error("expected digits after decimal point"))?;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_integer = false;
            self.bump();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.bump();
            }
            self.scan_digits()
                .map_err(|_| self.error("expected digits in exponent"))?;
        }

        let lexeme = &self.input[start..self.offset];
        if is_integer {
            // "-0" is permitted as a full integer part, unlike in the int rule
            if lexeme != "-0" {
                let value: i64 = lexeme
                    .parse()
                    .map_err(|_| self.error_at("integer out of interoperable range", start))?;
                if value.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
                    return Err(self.error_at("integer out of interoperable range", start));
                }
            }
        }
        serde_json::from_str(lexeme).map_err(|_| self.error_at("invalid number literal", start))
    }

    fn scan_digits(&mut self) -> JsonPathResult<&'a str> {
        let input = self.input;
        let digit_start = self.offset;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        if self.offset == digit_start {
            return Err(self.error("expected a digit"));
        }
        Ok(&input[digit_start..self.offset])
    }
}
