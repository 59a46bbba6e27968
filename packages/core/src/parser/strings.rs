//! String literal scanning with escape sequences
//!
//! Single- and double-quoted literals share one scanner; only the matching
//! quote may be escaped. `\uXXXX` escapes are UTF-16 code units: a high
//! surrogate must be followed by a `\u`-escaped low surrogate, and an
//! isolated low surrogate is an error.

use super::core::Parser;
use crate::error::JsonPathResult;

impl Parser<'_> {
    /// Scan a quoted string literal, returning its unescaped value
    pub(crate) fn parse_string_literal(&mut self) -> JsonPathResult<String> {
        let start = self.offset;
        let quote = match self.peek() {
            Some(q @ (b'\'' | b'"')) => q,
            _ => return Err(self.error("expected a string literal")),
        };
        self.bump();

        let mut value = String::new();
        loop {
            let c = match self.peek_char() {
                Some(c) => c,
                None => return Err(self.error_at("unterminated string literal", start)),
            };
            if c as u32 == u32::from(quote) {
                self.bump();
                return Ok(value);
            }
            if c == '\\' {
                let escape_start = self.offset;
                self.bump();
                let escaped = match self.peek_char() {
                    Some(e) => e,
                    None => return Err(self.error_at("unterminated string literal", start)),
                };
                match escaped {
                    'b' => {
                        value.push('\u{0008}');
                        self.bump();
                    }
                    'f' => {
                        value.push('\u{000C}');
                        self.bump();
                    }
                    'n' => {
                        value.push('\n');
                        self.bump();
                    }
                    'r' => {
                        value.push('\r');
                        self.bump();
                    }
                    't' => {
                        value.push('\t');
                        self.bump();
                    }
                    '/' => {
                        value.push('/');
                        self.bump();
                    }
                    '\\' => {
                        value.push('\\');
                        self.bump();
                    }
                    'u' => {
                        self.bump();
                        self.parse_unicode_escape(escape_start, &mut value)?;
                    }
                    e if e as u32 == u32::from(quote) => {
                        value.push(e);
                        self.bump();
                    }
                    _ => return Err(self.error_at("invalid escape sequence", escape_start)),
                }
            } else if (c as u32) < 0x20 {
                return Err(self.error("control characters must be escaped in string literals"));
            } else {
                value.push(c);
                self.bump_char(c);
            }
        }
    }

    /// Scan the hex digits of a `\u` escape, positioned just after the `u`
    fn parse_unicode_escape(&mut self, escape_start: usize, value: &mut String) -> JsonPathResult<()> {
        let code = self.parse_hex4(escape_start)?;
        if (0xD800..=0xDBFF).contains(&code) {
            // High surrogate: a \u-escaped low surrogate must follow
            if !(self.eat(b'\\') && self.eat(b'u')) {
                return Err(self.error_at(
                    "high surrogate must be followed by a low surrogate escape",
                    escape_start,
                ));
            }
            let low = self.parse_hex4(escape_start)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.error_at(
                    "high surrogate not followed by a valid low surrogate",
                    escape_start,
                ));
            }
            let scalar = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
            match char::from_u32(scalar) {
                Some(c) => value.push(c),
                None => {
                    return Err(self.error_at("invalid surrogate pair", escape_start));
                }
            }
        } else if (0xDC00..=0xDFFF).contains(&code) {
            return Err(self.error_at(
                "low surrogate without preceding high surrogate",
                escape_start,
            ));
        } else {
            match char::from_u32(code) {
                Some(c) => value.push(c),
                None => {
                    return Err(self.error_at("invalid unicode escape sequence", escape_start));
                }
            }
        }
        Ok(())
    }

    fn parse_hex4(&mut self, escape_start: usize) -> JsonPathResult<u32> {
        if self.offset + 4 > self.limit {
            return Err(self.error_at("incomplete unicode escape sequence", escape_start));
        }
        let bytes = &self.input.as_bytes()[self.offset..self.offset + 4];
        if !bytes.iter().all(u8::is_ascii_hexdigit) {
            return Err(self.error_at("invalid unicode escape sequence", escape_start));
        }
        // All four bytes are ASCII, so the slice is valid UTF-8
        let code = u32::from_str_radix(&self.input[self.offset..self.offset + 4], 16)
            .map_err(|_| self.error_at("invalid unicode escape sequence", escape_start))?;
        self.offset += 4;
        Ok(code)
    }
}
