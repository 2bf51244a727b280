//! Locate the source line of a key path in an indented document.
//!
//! The locator never parses the document. It walks the text once, line by
//! line, and infers structure from indentation alone:
//!
//! - a line indented exactly like the last matched key closes that level,
//! - a line one or two indentation units deeper than the current level may
//!   match the next segment,
//! - a property segment matches a line containing `"segment":`, with the
//!   segment JSON-escaped the way the document stores it,
//! - a numeric segment matches the Nth eligible line inside the current level.
//!
//! This ties the locator to one formatting convention: a consistent indent
//! unit and double-quoted keys, which is what `JSON.stringify(v, null, 2)` and
//! `serde_json::to_string_pretty` produce. Anything else degrades to "not
//! found" rather than an error.
//!
//! # Example
//!
//! ```
//! use keyline::{line_for_key, locate_line, NOT_FOUND};
//!
//! let conf = "{\n  \"a\": {\n    \"b\": 1\n  }\n}";
//! assert_eq!(locate_line(conf, "a.b"), Some(3));
//! assert_eq!(line_for_key(conf, Some("a.c")), NOT_FOUND);
//! assert_eq!(line_for_key(conf, None), NOT_FOUND);
//! ```

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::path::KeyPath;

/// Sentinel returned by [`line_for_key`] when there is nothing to highlight.
pub const NOT_FOUND: isize = -1;

/// Configuration for the line locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocateConfig {
    /// Width of one indentation level in the source text (default: 2)
    pub indent_width: usize,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl LocateConfig {
    /// Two-space indentation, as written by most JSON pretty-printers.
    pub fn two_spaces() -> Self {
        Self::default()
    }

    /// Four-space indentation.
    pub fn four_spaces() -> Self {
        Self { indent_width: 4 }
    }

    /// Set the indentation unit.
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }
}

/// A located line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineMatch {
    /// Line number (1-indexed).
    pub line: usize,
    /// Byte range of the line in the source, without its line feed.
    pub byte_range: (usize, usize),
    /// Leading whitespace width of the line.
    pub indent: usize,
}

/// Line locator.
///
/// A `Locator` holds only its configuration; every call builds its own search
/// state, so one value can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Locator {
    config: LocateConfig,
}

impl Locator {
    /// Create a locator with the given configuration.
    pub fn new(config: LocateConfig) -> Self {
        Self { config }
    }

    /// The configuration this locator was built with.
    #[inline]
    pub fn config(&self) -> &LocateConfig {
        &self.config
    }

    /// Find the line where the terminal segment of `path` begins.
    ///
    /// Returns `None` for an empty path or empty text, and when the walk
    /// reaches the end of `text` before every segment matched.
    pub fn locate(&self, text: &str, path: &KeyPath) -> Option<LineMatch> {
        if path.is_empty() || text.is_empty() {
            return None;
        }

        let mut state = SearchState::new(path, self.config.indent_width);
        let mut start = 0;

        for (i, line) in text.split('\n').enumerate() {
            let indent = indentation(line);
            if state.step(line, indent) {
                return Some(LineMatch {
                    line: i + 1,
                    byte_range: (start, start + line.len()),
                    indent,
                });
            }
            start += line.len() + 1;
        }

        None
    }

    /// [`locate`](Self::locate) with a dot-separated path, returning only the
    /// line number.
    pub fn locate_line(&self, text: &str, key_path: &str) -> Option<usize> {
        self.locate(text, &KeyPath::parse(key_path))
            .map(|found| found.line)
    }
}

/// Locate a dot-separated key path with the default two-space configuration.
pub fn locate_line(text: &str, key_path: &str) -> Option<usize> {
    Locator::default().locate_line(text, key_path)
}

/// Line number for a possibly absent key, or [`NOT_FOUND`].
///
/// This is the shape a code viewer consumes: no key selected and key not
/// present are both "no highlight".
pub fn line_for_key(text: &str, key_path: Option<&str>) -> isize {
    key_path
        .and_then(|key| locate_line(text, key))
        .and_then(|line| isize::try_from(line).ok())
        .unwrap_or(NOT_FOUND)
}

/// Width of the leading run of spaces and tabs.
#[inline]
fn indentation(line: &str) -> usize {
    line.bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count()
}

/// Append `"key":` to `out`, escaping `key` as a JSON string.
///
/// Escapes match `serde_json`: `"` and `\`, the short forms for backspace,
/// form feed, newline, carriage return and tab, and `\u00XX` for the other
/// control characters.
fn push_key_token(out: &mut String, key: &str) {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    out.push('"');
    for c in key.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' => {
                let b = c as u8;
                out.push_str("\\u00");
                out.push(HEX[usize::from(b >> 4)] as char);
                out.push(HEX[usize::from(b & 0xF)] as char);
            }
            c => out.push(c),
        }
    }
    out.push_str("\":");
}

/// Per-call search state.
struct SearchState<'p> {
    path: &'p KeyPath,
    /// `"segment":` for each segment of the path, JSON-escaped.
    tokens: Vec<String>,
    /// Segments matched so far.
    keys: Vec<&'p str>,
    /// Indentation of each matched level, above the root's `0`.
    indents: Vec<usize>,
    /// Elements seen so far in the array at the current level.
    elements: usize,
    unit: usize,
}

impl<'p> SearchState<'p> {
    fn new(path: &'p KeyPath, unit: usize) -> Self {
        Self {
            path,
            tokens: path
                .segments()
                .iter()
                .map(|s| {
                    let mut token = String::with_capacity(s.as_str().len() + 3);
                    push_key_token(&mut token, s.as_str());
                    token
                })
                .collect(),
            keys: Vec::with_capacity(path.len()),
            indents: vec![0],
            elements: 0,
            unit,
        }
    }

    #[inline]
    fn level_indent(&self) -> usize {
        self.indents.last().copied().unwrap_or(0)
    }

    /// Consume one line. Returns `true` once every segment has matched.
    fn step(&mut self, line: &str, indent: usize) -> bool {
        if !self.keys.is_empty() && indent == self.level_indent() {
            self.keys.pop();
            self.indents.pop();
            self.elements = 0;
        }

        // Offsets that overflow can never equal a real indentation.
        let base = self.level_indent();
        let one_deeper = base.checked_add(self.unit);
        let two_deeper = self
            .unit
            .checked_mul(2)
            .and_then(|step| base.checked_add(step));
        let eligible =
            indent == 0 || Some(indent) == one_deeper || Some(indent) == two_deeper;

        let level = self.keys.len();
        if eligible && level < self.tokens.len() {
            let path = self.path;
            let segment = &path.segments()[level];

            // An array-opening line is never one of its own elements.
            if line.contains(self.tokens[level].as_str()) {
                self.keys.push(segment.as_str());
                self.indents.push(indent);
            } else if let Some(wanted) = segment.index() {
                if self.elements == wanted {
                    self.keys.push(segment.as_str());
                    self.indents.push(indent);
                } else {
                    self.elements += 1;
                }
            }
        }

        self.keys.len() == self.tokens.len()
    }
}
