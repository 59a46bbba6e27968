//! RFC 9535 Sections 2.4.6 & 2.4.7: match() and search() functions
//!
//! Both take a subject string and an I-Regexp (RFC 9485) pattern string.
//! `match` tests the whole subject, `search` any substring. Ill-typed
//! arguments and patterns that fail to compile yield false, never an error.

use std::collections::HashMap;
use std::sync::RwLock;

use regex::Regex;

use super::TypedValue;

/// Compiled regex cache shared across evaluations
///
/// Bounded so pathological workloads with unbounded distinct patterns do
/// not grow it without limit; misses past the cap still compile, they just
/// are not retained.
struct RegexCache {
    cache: RwLock<HashMap<String, Regex>>,
}

const REGEX_CACHE_LIMIT: usize = 64;

impl RegexCache {
    fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn get_or_compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        if let Ok(cache) = self.cache.read() {
            if let Some(re) = cache.get(pattern) {
                return Ok(re.clone());
            }
        }

        let re = Regex::new(pattern)?;

        if let Ok(mut cache) = self.cache.write() {
            if cache.len() < REGEX_CACHE_LIMIT {
                cache.insert(pattern.to_string(), re.clone());
            }
        }

        Ok(re)
    }
}

lazy_static::lazy_static! {
    static ref REGEX_CACHE: RegexCache = RegexCache::new();
}

pub(super) fn evaluate_match(args: &[TypedValue]) -> TypedValue {
    TypedValue::Logical(regex_test(args, true))
}

pub(super) fn evaluate_search(args: &[TypedValue]) -> TypedValue {
    TypedValue::Logical(regex_test(args, false))
}

fn regex_test(args: &[TypedValue], anchored: bool) -> bool {
    let (subject, pattern) = match (args.first(), args.get(1)) {
        (Some(TypedValue::Value(Some(s))), Some(TypedValue::Value(Some(p)))) => {
            match (s.as_str(), p.as_str()) {
                (Some(s), Some(p)) => (s, p),
                _ => return false,
            }
        }
        _ => return false,
    };

    let mut translated = iregexp_to_regex(pattern);
    if anchored {
        translated = format!("^(?:{translated})$");
    }

    match REGEX_CACHE.get_or_compile(&translated) {
        Ok(re) => re.is_match(subject),
        Err(err) => {
            log::debug!("rejecting I-Regexp pattern {pattern:?}: {err}");
            false
        }
    }
}

/// Translate an I-Regexp pattern (RFC 9485) into `regex` syntax
///
/// The dialects agree except that an unescaped `.` outside a character
/// class matches any character but CR and LF in I-Regexp. Constructs
/// I-Regexp forbids but `regex` lacks too (backreferences, lookaround)
/// fail at compile time and surface as a false result.
fn iregexp_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '.' if !in_class => out.push_str("[^\\n\\r]"),
            '[' if !in_class => {
                in_class = true;
                out.push('[');
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_is_rewritten_outside_classes() {
        assert_eq!(iregexp_to_regex("a.b"), "a[^\\n\\r]b");
        assert_eq!(iregexp_to_regex("a[.]b"), "a[.]b");
        assert_eq!(iregexp_to_regex("a\\.b"), "a\\.b");
        assert_eq!(iregexp_to_regex("[^.]*"), "[^.]*");
    }

    #[test]
    fn escaped_bracket_does_not_open_class() {
        assert_eq!(iregexp_to_regex("\\[."), "\\[[^\\n\\r]");
    }
}
