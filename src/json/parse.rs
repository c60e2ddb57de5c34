//! Spanned JSON reader.
//!
//! Produces a value tree where every node knows where it starts, and every
//! string (value or key) also remembers the raw bytes between its quotes.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use thiserror::Error;

use super::scan::Cursor;

/// A JSON value together with the cursor of its first byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: Value,
    pub start: Cursor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Numbers are kept as written; outlines never need their value.
    Number(String),
    String(Str),
    Array(Vec<Node>),
    /// Entries in source order. Duplicate keys are kept.
    Object(Vec<Entry>),
}

/// A string value or object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Str {
    /// The unescaped text.
    pub value: String,
    /// Byte range of the raw text between the quotes.
    pub raw: Range<usize>,
    /// Cursor of the first byte after the opening quote.
    pub start: Cursor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: Str,
    pub value: Node,
}

/// Malformed JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{problem} at {at}")]
pub struct SyntaxError {
    pub at: Cursor,
    pub problem: SyntaxProblem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxProblem {
    UnexpectedEnd,
    UnexpectedChar(char),
    BadEscape,
    ControlCharInString,
    BadNumber,
    TrailingContent,
}

impl fmt::Display for SyntaxProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxProblem::UnexpectedEnd => write!(f, "unexpected end of file"),
            SyntaxProblem::UnexpectedChar(c) => write!(f, "unexpected character `{}`", c.escape_default()),
            SyntaxProblem::BadEscape => write!(f, "invalid escape sequence"),
            SyntaxProblem::ControlCharInString => write!(f, "control character inside a string"),
            SyntaxProblem::BadNumber => write!(f, "malformed number"),
            SyntaxProblem::TrailingContent => write!(f, "unexpected content after the JSON value"),
        }
    }
}

/// Parse a complete JSON document.
pub fn parse(src: &str) -> Result<Node, SyntaxError> {
    let mut parser = Parser {
        src,
        bytes: src.as_bytes(),
        at: Cursor::START,
    };

    parser.skip_whitespace();
    let node = parser.value()?;
    parser.skip_whitespace();

    if parser.peek().is_some() {
        return Err(parser.error(SyntaxProblem::TrailingContent));
    }

    Ok(node)
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    at: Cursor,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.at.offset).copied()
    }

    fn bump(&mut self) {
        if let Some(byte) = self.peek() {
            self.at.offset += 1;
            if byte == b'\n' {
                self.at.row += 1;
                self.at.col = 1;
            } else {
                self.at.col += 1;
            }
        }
    }

    fn error(&self, problem: SyntaxProblem) -> SyntaxError {
        SyntaxError {
            at: self.at,
            problem,
        }
    }

    fn unexpected(&self) -> SyntaxError {
        match self.src[self.at.offset..].chars().next() {
            Some(c) => self.error(SyntaxProblem::UnexpectedChar(c)),
            None => self.error(SyntaxProblem::UnexpectedEnd),
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), SyntaxError> {
        if self.peek() == Some(byte) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.bump();
        }
    }

    fn value(&mut self) -> Result<Node, SyntaxError> {
        let start = self.at;
        let value = match self.peek() {
            Some(b'{') => self.object()?,
            Some(b'[') => self.array()?,
            Some(b'"') => Value::String(self.string()?),
            Some(b't') => self.keyword("true", Value::Bool(true))?,
            Some(b'f') => self.keyword("false", Value::Bool(false))?,
            Some(b'n') => self.keyword("null", Value::Null)?,
            Some(b'-' | b'0'..=b'9') => self.number()?,
            _ => return Err(self.unexpected()),
        };

        Ok(Node { value, start })
    }

    fn keyword(&mut self, word: &str, value: Value) -> Result<Value, SyntaxError> {
        for &byte in word.as_bytes() {
            self.expect(byte)?;
        }
        Ok(value)
    }

    fn digits(&mut self) -> usize {
        let mut count = 0;
        while let Some(b'0'..=b'9') = self.peek() {
            self.bump();
            count += 1;
        }
        count
    }

    fn number(&mut self) -> Result<Value, SyntaxError> {
        let start = self.at.offset;

        if self.peek() == Some(b'-') {
            self.bump();
        }

        match self.peek() {
            Some(b'0') => self.bump(),
            Some(b'1'..=b'9') => {
                self.digits();
            }
            _ => return Err(self.error(SyntaxProblem::BadNumber)),
        }

        if self.peek() == Some(b'.') {
            self.bump();
            if self.digits() == 0 {
                return Err(self.error(SyntaxProblem::BadNumber));
            }
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.bump();
            if let Some(b'+' | b'-') = self.peek() {
                self.bump();
            }
            if self.digits() == 0 {
                return Err(self.error(SyntaxProblem::BadNumber));
            }
        }

        Ok(Value::Number(self.src[start..self.at.offset].to_string()))
    }

    fn string(&mut self) -> Result<Str, SyntaxError> {
        self.expect(b'"')?;
        let start = self.at;

        loop {
            match self.peek() {
                None => return Err(self.error(SyntaxProblem::UnexpectedEnd)),
                Some(b'"') => break,
                Some(b'\\') => {
                    self.bump();
                    self.escape()?;
                }
                Some(byte) if byte < 0x20 => {
                    return Err(self.error(SyntaxProblem::ControlCharInString));
                }
                Some(_) => self.bump(),
            }
        }

        let raw = start.offset..self.at.offset;
        self.bump();

        Ok(Str {
            value: unescape(&self.src[raw.clone()]).into_owned(),
            raw,
            start,
        })
    }

    fn escape(&mut self) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
                self.bump();
                Ok(())
            }
            Some(b'u') => {
                self.bump();
                for _ in 0..4 {
                    match self.peek() {
                        Some(byte) if byte.is_ascii_hexdigit() => self.bump(),
                        _ => return Err(self.error(SyntaxProblem::BadEscape)),
                    }
                }
                Ok(())
            }
            _ => Err(self.error(SyntaxProblem::BadEscape)),
        }
    }

    fn array(&mut self) -> Result<Value, SyntaxError> {
        self.expect(b'[')?;
        self.skip_whitespace();

        let mut items = Vec::new();
        if self.peek() == Some(b']') {
            self.bump();
            return Ok(Value::Array(items));
        }

        loop {
            self.skip_whitespace();
            items.push(self.value()?);
            self.skip_whitespace();

            match self.peek() {
                Some(b',') => self.bump(),
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn object(&mut self) -> Result<Value, SyntaxError> {
        self.expect(b'{')?;
        self.skip_whitespace();

        let mut entries = Vec::new();
        if self.peek() == Some(b'}') {
            self.bump();
            return Ok(Value::Object(entries));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.unexpected());
            }
            let key = self.string()?;

            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();

            let value = self.value()?;
            entries.push(Entry { key, value });
            self.skip_whitespace();

            match self.peek() {
                Some(b',') => self.bump(),
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Object(entries));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }
}

/// Decode the escapes of raw string contents.
///
/// Input is expected to have been checked by the parser; a malformed escape
/// is kept verbatim rather than rejected.
pub fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let rest = chars.as_str();
                match hex4(rest) {
                    Some(high @ 0xD800..=0xDBFF) => {
                        let low = rest
                            .get(4..)
                            .and_then(|tail| tail.strip_prefix("\\u"))
                            .and_then(hex4)
                            .filter(|low| (0xDC00..=0xDFFF).contains(low));
                        match low {
                            Some(low) => {
                                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                                chars = rest[10..].chars();
                            }
                            None => {
                                out.push('\u{FFFD}');
                                chars = rest[4..].chars();
                            }
                        }
                    }
                    Some(code) => {
                        out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                        chars = rest[4..].chars();
                    }
                    None => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    Cow::Owned(out)
}

fn hex4(s: &str) -> Option<u32> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
