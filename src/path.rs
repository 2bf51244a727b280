//! Key paths into serialized documents.
//!
//! A [`KeyPath`] is an ordered list of [`Segment`]s. The canonical spelling is
//! dot-separated (`tauri.bundle.identifier`, `plugins.2.name`), but paths can
//! also be built from the other notations tools hand out:
//!
//! - JSON Pointer (RFC 6901): `/plugins/2/name`
//! - jq-style paths: `.plugins[2].name`
//!
//! ```
//! use keyline::KeyPath;
//!
//! let dotted = KeyPath::parse("plugins.2.name");
//! let pointer = KeyPath::from_json_pointer("/plugins/2/name").unwrap();
//! let jq = KeyPath::from_jq(".plugins[2].name").unwrap();
//!
//! assert_eq!(dotted, pointer);
//! assert_eq!(dotted, jq);
//! assert_eq!(dotted.segments()[1].index(), Some(2));
//! ```

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Error raised when a JSON Pointer or jq path cannot be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub message: String,
    /// Byte offset into the input where the problem was found.
    pub position: usize,
}

impl PathError {
    fn new(message: impl Into<String>, position: usize) -> Self {
        PathError {
            message: message.into(),
            position,
        }
    }
}

impl core::fmt::Display for PathError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "invalid key path at position {}: {}",
            self.position, self.message
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PathError {}

/// One step of a key path.
///
/// A segment is matched as a property name, and when it is spelled with ASCII
/// digits only it is also a candidate array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    name: String,
}

impl Segment {
    pub fn new(name: impl Into<String>) -> Self {
        Segment { name: name.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The array index this segment denotes, if it is a non-negative integer.
    ///
    /// Only plain ASCII digits count, so `"+1"` and `" 1"` are property names.
    pub fn index(&self) -> Option<usize> {
        if self.name.is_empty() || !self.name.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.name.parse().ok()
    }
}

/// An ordered sequence of segments identifying a nested property or array
/// element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Split a dot-separated path into segments.
    ///
    /// Parsing is total. The empty string is the empty path; `"a..b"` has an
    /// empty middle segment.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::default();
        }
        KeyPath {
            segments: path.split('.').map(Segment::new).collect(),
        }
    }

    /// Convert an RFC 6901 JSON Pointer.
    ///
    /// `""` is the document root and yields the empty path.
    pub fn from_json_pointer(pointer: &str) -> Result<Self, PathError> {
        if pointer.is_empty() {
            return Ok(Self::default());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PathError::new("JSON pointer must start with '/'", 0));
        };

        let mut segments = Vec::new();
        let mut offset = 1;
        for token in rest.split('/') {
            segments.push(Segment::new(unescape_pointer_token(token, offset)?));
            offset += token.len() + 1;
        }
        Ok(KeyPath { segments })
    }

    /// Convert a jq-style path such as `.plugins[2].name` or `.["odd key"]`.
    ///
    /// `.` is the document root and yields the empty path.
    pub fn from_jq(path: &str) -> Result<Self, PathError> {
        JqPathParser::new(path).parse()
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(Segment::new(segment));
    }
}

impl core::fmt::Display for KeyPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Decode `~1` to `/` and `~0` to `~`.
fn unescape_pointer_token(token: &str, offset: usize) -> Result<String, PathError> {
    if !token.contains('~') {
        return Ok(token.to_string());
    }

    let mut out = String::with_capacity(token.len());
    let mut chars = token.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '0')) => out.push('~'),
            Some((_, '1')) => out.push('/'),
            Some((_, other)) => {
                return Err(PathError::new(
                    format!("invalid escape '~{}'", other),
                    offset + i,
                ))
            }
            None => return Err(PathError::new("dangling '~'", offset + i)),
        }
    }
    Ok(out)
}

/// Parser for the path subset of jq syntax.
struct JqPathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> JqPathParser<'a> {
    fn new(input: &'a str) -> Self {
        JqPathParser { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect(&mut self, expected: char) -> Result<(), PathError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == expected => {
                self.next();
                Ok(())
            }
            Some(c) => Err(PathError::new(
                format!("expected '{}', found '{}'", expected, c),
                self.pos,
            )),
            None => Err(PathError::new(
                format!("expected '{}', found end of input", expected),
                self.pos,
            )),
        }
    }

    fn parse(mut self) -> Result<KeyPath, PathError> {
        let mut path = KeyPath::default();

        self.expect('.')?;
        self.skip_ws();
        if self.is_eof() {
            return Ok(path);
        }

        loop {
            self.skip_ws();
            let segment = match self.peek() {
                Some('[') => self.parse_bracket()?,
                Some('"') => self.parse_string()?,
                Some(c) if c.is_alphabetic() || c == '_' => self.parse_ident(),
                Some(c) => {
                    return Err(PathError::new(
                        format!("unexpected character '{}'", c),
                        self.pos,
                    ))
                }
                None => return Err(PathError::new("expected field after '.'", self.pos)),
            };
            path.push(segment);

            self.skip_ws();
            match self.peek() {
                None => break,
                Some('[') => {}
                Some('.') => {
                    self.next();
                }
                Some(c) => {
                    return Err(PathError::new(
                        format!("expected '.' or '[', found '{}'", c),
                        self.pos,
                    ))
                }
            }
        }

        Ok(path)
    }

    fn parse_ident(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.next();
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    /// `[0]` or `["key"]`.
    fn parse_bracket(&mut self) -> Result<String, PathError> {
        self.expect('[')?;
        self.skip_ws();

        let segment = match self.peek() {
            Some('"') => self.parse_string()?,
            Some(c) if c.is_ascii_digit() => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.next();
                }
                self.input[start..self.pos].to_string()
            }
            Some('-') => {
                return Err(PathError::new(
                    "negative indices cannot be located",
                    self.pos,
                ))
            }
            Some(c) => {
                return Err(PathError::new(
                    format!("expected index or string, found '{}'", c),
                    self.pos,
                ))
            }
            None => {
                return Err(PathError::new(
                    "expected index or string, found end of input",
                    self.pos,
                ))
            }
        };

        self.expect(']')?;
        Ok(segment)
    }

    /// A double-quoted string with `\"` and `\\` escapes.
    fn parse_string(&mut self) -> Result<String, PathError> {
        let start = self.pos;
        self.expect('"')?;

        let mut out = String::new();
        loop {
            match self.next() {
                Some('"') => return Ok(out),
                Some('\\') => match self.next() {
                    Some(c @ ('"' | '\\' | '/')) => out.push(c),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => {
                        return Err(PathError::new(
                            format!("unsupported escape '\\{}'", c),
                            self.pos - c.len_utf8(),
                        ))
                    }
                    None => return Err(PathError::new("unterminated string", start)),
                },
                Some(c) => out.push(c),
                None => return Err(PathError::new("unterminated string", start)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(path: &KeyPath) -> Vec<&str> {
        path.segments().iter().map(Segment::as_str).collect()
    }

    #[test]
    fn test_parse_dotted() {
        let path = KeyPath::parse("tauri.bundle.identifier");
        assert_eq!(names(&path), ["tauri", "bundle", "identifier"]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "tauri.bundle.identifier");
    }

    #[test]
    fn test_parse_empty() {
        assert!(KeyPath::parse("").is_empty());
        assert_eq!(names(&KeyPath::parse("a..b")), ["a", "", "b"]);
        assert_eq!(names(&KeyPath::parse(".")), ["", ""]);
    }

    #[test]
    fn test_segment_index() {
        assert_eq!(Segment::new("0").index(), Some(0));
        assert_eq!(Segment::new("12").index(), Some(12));
        assert_eq!(Segment::new("007").index(), Some(7));
        assert_eq!(Segment::new("+1").index(), None);
        assert_eq!(Segment::new("-1").index(), None);
        assert_eq!(Segment::new("1a").index(), None);
        assert_eq!(Segment::new("").index(), None);
        assert_eq!(Segment::new("name").index(), None);
    }

    #[test]
    fn test_json_pointer() {
        let path = KeyPath::from_json_pointer("/plugins/2/name").unwrap();
        assert_eq!(names(&path), ["plugins", "2", "name"]);

        assert!(KeyPath::from_json_pointer("").unwrap().is_empty());
        assert_eq!(names(&KeyPath::from_json_pointer("/").unwrap()), [""]);
    }

    #[test]
    fn test_json_pointer_escapes() {
        let path = KeyPath::from_json_pointer("/a~1b/m~0n/~01").unwrap();
        assert_eq!(names(&path), ["a/b", "m~n", "~1"]);
    }

    #[test]
    fn test_json_pointer_errors() {
        let err = KeyPath::from_json_pointer("plugins/2").unwrap_err();
        assert_eq!(err.position, 0);

        let err = KeyPath::from_json_pointer("/ab/c~2").unwrap_err();
        assert_eq!(err.position, 5);
        assert!(err.message.contains("~2"));

        let err = KeyPath::from_json_pointer("/x~").unwrap_err();
        assert_eq!(err.position, 2);
    }

    #[test]
    fn test_jq_paths() {
        assert!(KeyPath::from_jq(".").unwrap().is_empty());
        assert_eq!(
            names(&KeyPath::from_jq(".tauri.bundle").unwrap()),
            ["tauri", "bundle"]
        );
        assert_eq!(
            names(&KeyPath::from_jq(".plugins[2].name").unwrap()),
            ["plugins", "2", "name"]
        );
        assert_eq!(
            names(&KeyPath::from_jq(".plugins.[2]").unwrap()),
            ["plugins", "2"]
        );
        assert_eq!(names(&KeyPath::from_jq(".[0][1]").unwrap()), ["0", "1"]);
        assert_eq!(
            names(&KeyPath::from_jq(r#".["odd key"]."with \"quote\"""#).unwrap()),
            ["odd key", "with \"quote\""]
        );
    }

    #[test]
    fn test_jq_errors() {
        assert!(KeyPath::from_jq("").is_err());
        assert!(KeyPath::from_jq("foo").is_err());
        assert!(KeyPath::from_jq(".foo.").is_err());
        assert!(KeyPath::from_jq(".foo[").is_err());
        assert!(KeyPath::from_jq(".foo[-1]").is_err());
        assert!(KeyPath::from_jq(".foo bar").is_err());
        assert!(KeyPath::from_jq(r#".["open"#).is_err());
    }

    #[test]
    fn test_display_error() {
        let err = KeyPath::from_jq("foo").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid key path at position 0: expected '.', found 'f'"
        );
    }
}
