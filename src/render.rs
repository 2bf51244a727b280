//! Plain-text rendering of a located line with surrounding context.
//!
//! ```
//! use keyline::render::{render_window, Style};
//!
//! let conf = "{\n  \"a\": {\n    \"b\": 1\n  }\n}";
//! let out = render_window(conf, 3, 1, &Style::plain()).unwrap();
//! assert_eq!(out, "  2 |   \"a\": {\n> 3 |     \"b\": 1\n  4 |   }");
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const MARKER: &str = "\x1b[1;32m"; // Bold green
    pub const LINE_NUM: &str = "\x1b[0;34m"; // Blue
    pub const HIGHLIGHT: &str = "\x1b[1;33m"; // Bold yellow
}

/// Escape sequences used by [`render_window`]; empty strings disable color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub marker: &'static str,
    pub line_num: &'static str,
    pub highlight: &'static str,
    pub reset: &'static str,
}

impl Style {
    /// No escape sequences.
    pub fn plain() -> Self {
        Self {
            marker: "",
            line_num: "",
            highlight: "",
            reset: "",
        }
    }

    /// ANSI colors for terminals.
    pub fn ansi() -> Self {
        Self {
            marker: colors::MARKER,
            line_num: colors::LINE_NUM,
            highlight: colors::HIGHLIGHT,
            reset: colors::RESET,
        }
    }

    /// [`ansi`](Self::ansi) when `use_color` is set, [`plain`](Self::plain)
    /// otherwise.
    pub fn new(use_color: bool) -> Self {
        if use_color {
            Self::ansi()
        } else {
            Self::plain()
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::plain()
    }
}

/// Render lines `line - context ..= line + context` of `text`, marking `line`.
///
/// The window is clamped to the document. Returns `None` when `line` is 0 or
/// past the last line.
pub fn render_window(text: &str, line: usize, context: usize, style: &Style) -> Option<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    if line == 0 || line > lines.len() {
        return None;
    }

    let first = line.saturating_sub(context).max(1);
    let last = line.saturating_add(context).min(lines.len());
    let width = digits(last);

    let mut out = String::new();
    for n in first..=last {
        if n > first {
            out.push('\n');
        }
        let content = lines[n - 1].trim_end_matches('\r');
        // Writing into a String cannot fail.
        let _ = if n == line {
            write!(
                out,
                "{}>{} {}{:>width$}{} | {}{}{}",
                style.marker,
                style.reset,
                style.line_num,
                n,
                style.reset,
                style.highlight,
                content,
                style.reset,
                width = width
            )
        } else {
            write!(
                out,
                "  {}{:>width$}{} | {}",
                style.line_num,
                n,
                style.reset,
                content,
                width = width
            )
        };
    }

    Some(out)
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
