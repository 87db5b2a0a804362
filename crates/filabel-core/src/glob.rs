//! Shell-style glob patterns.
//!
//! Provides [`Glob`], a compiled wildcard pattern with `fnmatch` semantics:
//!
//! - `*` matches any run of characters, `/` included
//! - `?` matches exactly one character
//! - `[seq]` matches one character in `seq`, `[!seq]` one character not in it
//! - ranges such as `a-z` are allowed inside brackets, and a `]` directly
//!   after the opening bracket (or `[!`) is taken literally
//! - an unclosed `[` is a literal bracket
//!
//! Matching is case-sensitive and always spans the whole path.

use std::fmt;

use regex::Regex;

use crate::error::{Error, Result};

/// A compiled glob pattern.
///
/// # Examples
///
/// ```
/// use filabel_core::Glob;
///
/// let glob = Glob::new("*.py").unwrap();
/// assert!(glob.is_match("src/app.py"));
/// assert!(!glob.is_match("src/app.pyc"));
/// ```
#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    regex: Regex,
}

impl Glob {
    /// Compile a glob pattern.
    ///
    /// A bracket class that can never match (e.g. `[z-a]`) is accepted and
    /// simply never matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the translated expression is
    /// rejected by the regex engine.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let translated = translate(&pattern);
        let regex = Regex::new(&translated).map_err(|e| Error::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { pattern, regex })
    }

    /// Check whether `path` matches this pattern in full.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The pattern as written in the configuration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl PartialEq for Glob {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for Glob {}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Bracket expression parsed out of a pattern.
struct Class {
    negated: bool,
    ranges: Vec<(char, char)>,
}

impl Class {
    /// Parse a bracket expression whose body starts at `start` (just past
    /// the `[`). Returns the class and the index after the closing `]`, or
    /// `None` if the bracket is never closed.
    fn parse(chars: &[char], start: usize) -> Option<(Self, usize)> {
        let mut end = start;
        if chars.get(end) == Some(&'!') {
            end += 1;
        }
        if chars.get(end) == Some(&']') {
            end += 1;
        }
        while end < chars.len() && chars[end] != ']' {
            end += 1;
        }
        if end >= chars.len() {
            return None;
        }

        let (negated, body) = match chars[start..end].split_first() {
            Some(('!', rest)) => (true, rest),
            _ => (false, &chars[start..end]),
        };

        let mut ranges = Vec::new();
        let mut k = 0;
        while k < body.len() {
            if k + 2 < body.len() && body[k + 1] == '-' {
                let (lo, hi) = (body[k], body[k + 2]);
                // Reversed ranges match nothing.
                if lo <= hi {
                    ranges.push((lo, hi));
                }
                k += 3;
            } else {
                ranges.push((body[k], body[k]));
                k += 1;
            }
        }

        Some((Self { negated, ranges }, end + 1))
    }

    fn to_regex(&self) -> String {
        if self.ranges.is_empty() {
            if self.negated {
                return ".".to_string();
            }
            return NEVER.to_string();
        }

        let mut out = String::from("[");
        if self.negated {
            out.push('^');
        }
        for &(lo, hi) in &self.ranges {
            if lo == hi {
                out.push_str(&format!("\\x{{{:X}}}", u32::from(lo)));
            } else {
                out.push_str(&format!(
                    "\\x{{{:X}}}-\\x{{{:X}}}",
                    u32::from(lo),
                    u32::from(hi)
                ));
            }
        }
        out.push(']');
        out
    }
}

/// Class matching no character at all.
const NEVER: &str = r"[^\x{0}-\x{10FFFF}]";

/// Translate a glob into an anchored regular expression.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from(r"(?s)\A");
    let mut buf = [0u8; 4];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match Class::parse(&chars, i) {
                Some((class, next)) => {
                    out.push_str(&class.to_regex());
                    i = next;
                }
                None => out.push_str(r"\["),
            },
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }

    out.push_str(r"\z");
    out
}
