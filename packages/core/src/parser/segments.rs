//! Segment parsing: dot shorthand, descendant, and bracketed forms
//!
//! `segments = *(S segment)`: blanks may precede a segment but belong to
//! it, so trailing blanks with no following segment are left unconsumed
//! and surface as trailing-input errors at the entry points.

use super::core::Parser;
use crate::ast::{Segment, Selector};
use crate::error::JsonPathResult;

impl Parser<'_> {
    /// Parse zero or more segments
    pub(crate) fn parse_segments(&mut self) -> JsonPathResult<Vec<Segment>> {
        let mut segments = Vec::new();
        loop {
            let mark = self.offset;
            self.skip_blanks();
            match self.peek() {
                Some(b'.' | b'[') => segments.push(self.parse_segment()?),
                _ => {
                    self.offset = mark;
                    break;
                }
            }
        }
        Ok(segments)
    }

    /// Parse a single segment starting at `.`, `..`, or `[`
    pub(crate) fn parse_segment(&mut self) -> JsonPathResult<Segment> {
        match self.peek() {
            Some(b'[') => Ok(Segment::Child {
                selectors: self.parse_bracketed_selectors()?,
            }),
            Some(b'.') => {
                self.bump();
                if self.eat(b'.') {
                    self.parse_descendant_segment()
                } else if self.eat(b'*') {
                    Ok(Segment::Child {
                        selectors: vec![Selector::Wildcard],
                    })
                } else {
                    let name = self.parse_shorthand_name()?;
                    Ok(Segment::Child {
                        selectors: vec![Selector::Name(name)],
                    })
                }
            }
            _ => Err(self.error("expected '.', '..', or '[' to begin a segment")),
        }
    }

    /// Parse the remainder of a `..` segment
    fn parse_descendant_segment(&mut self) -> JsonPathResult<Segment> {
        match self.peek() {
            Some(b'[') => Ok(Segment::Descendant {
                selectors: self.parse_bracketed_selectors()?,
            }),
            Some(b'*') => {
                self.bump();
                Ok(Segment::Descendant {
                    selectors: vec![Selector::Wildcard],
                })
            }
            _ => {
                let name = self.parse_shorthand_name()?;
                Ok(Segment::Descendant {
                    selectors: vec![Selector::Name(name)],
                })
            }
        }
    }

    /// Parse `[ selector *( "," selector ) ]` with blanks between tokens
    fn parse_bracketed_selectors(&mut self) -> JsonPathResult<Vec<Selector>> {
        self.expect(b'[', "expected '['")?;
        self.skip_blanks();
        let mut selectors = vec![self.parse_selector()?];
        loop {
            self.skip_blanks();
            if self.eat(b',') {
                self.skip_blanks();
                selectors.push(self.parse_selector()?);
            } else {
                break;
            }
        }
        self.expect(b']', "expected ']' after selector list")?;
        Ok(selectors)
    }
}
