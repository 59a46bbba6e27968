//! Selector parsing: name, wildcard, index, slice, filter
//!
//! Called with the cursor on the first character of a selector inside a
//! bracketed list. Shorthand names are not valid here; names must be
//! quoted.

use super::core::Parser;
use crate::ast::Selector;
use crate::error::JsonPathResult;

impl Parser<'_> {
    /// Parse a single selector
    pub(crate) fn parse_selector(&mut self) -> JsonPathResult<Selector> {
        match self.peek() {
            Some(b'\'' | b'"') => Ok(Selector::Name(self.parse_string_literal()?)),
            Some(b'*') => {
                self.bump();
                Ok(Selector::Wildcard)
            }
            Some(b'?') => {
                self.bump();
                self.skip_blanks();
                Ok(Selector::Filter(self.parse_filter_body()?))
            }
            Some(b':') => self.parse_slice(None),
            Some(c) if c == b'-' || c.is_ascii_digit() => {
                let index = self.parse_int()?;
                let mark = self.offset;
                self.skip_blanks();
                if self.peek() == Some(b':') {
                    self.parse_slice(Some(index))
                } else {
                    self.offset = mark;
                    Ok(Selector::Index(index))
                }
            }
            _ => Err(self.error("expected a selector")),
        }
    }

    /// Parse a slice from the first `:`, with any already-scanned start
    fn parse_slice(&mut self, start: Option<i64>) -> JsonPathResult<Selector> {
        self.bump(); // first ':'
        self.skip_blanks();
        let end = match self.peek() {
            Some(c) if c == b'-' || c.is_ascii_digit() => Some(self.parse_int()?),
            _ => None,
        };
        let mark = self.offset;
        self.skip_blanks();
        let step = if self.peek() == Some(b':') {
            self.bump();
            self.skip_blanks();
            match self.peek() {
                Some(c) if c == b'-' || c.is_ascii_digit() => Some(self.parse_int()?),
                _ => None,
            }
        } else {
            self.offset = mark;
            None
        };
        Ok(Selector::Slice { start, end, step })
    }
}
