//! Field-addressed decode combinators over the spanned JSON tree.
//!
//! Every combinator returns a `DecodeError` that records where in the file
//! the problem is and which fields lead to it. Problems specific to a file
//! format are carried in the `P` parameter.

use std::fmt;

use super::parse::{Entry, Node, Str, SyntaxError, SyntaxProblem, Value};
use super::scan::{self, Cursor};

/// One step of the path from the document root to a failing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// The JSON shape a decoder wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    String,
    Array,
    Object,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::String => write!(f, "a string"),
            Expected::Array => write!(f, "an array"),
            Expected::Object => write!(f, "an object"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason<P> {
    /// The document is not JSON at all.
    Syntax(SyntaxProblem),
    Expecting(Expected),
    MissingField(String),
    /// The value has the right shape but its content is rejected.
    Failure(P),
    /// None of several accepted shapes matched; one error per alternative.
    OneOf(Vec<DecodeError<P>>),
}

/// A decode failure with the path and position that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError<P> {
    pub path: Vec<Segment>,
    pub at: Cursor,
    pub reason: Reason<P>,
}

impl<P> DecodeError<P> {
    pub fn new(at: Cursor, reason: Reason<P>) -> Self {
        DecodeError {
            path: Vec::new(),
            at,
            reason,
        }
    }

    pub fn failure(at: Cursor, problem: P) -> Self {
        Self::new(at, Reason::Failure(problem))
    }

    pub fn expecting(at: Cursor, expected: Expected) -> Self {
        Self::new(at, Reason::Expecting(expected))
    }

    pub fn syntax(err: SyntaxError) -> Self {
        Self::new(err.at, Reason::Syntax(err.problem))
    }

    /// Prefix the path with the segment this error was found under.
    pub fn within(mut self, segment: Segment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// The problem, if this is a content failure.
    pub fn problem(&self) -> Option<&P> {
        match &self.reason {
            Reason::Failure(problem) => Some(problem),
            _ => None,
        }
    }

    /// Render the path as `a.b[0].c`.
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                Segment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                Segment::Index(index) => out.push_str(&format!("[{}]", index)),
            }
        }
        out
    }
}

impl<P: fmt::Display> fmt::Display for Reason<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Syntax(problem) => write!(f, "{}", problem),
            Reason::Expecting(expected) => write!(f, "expecting {}", expected),
            Reason::MissingField(name) => write!(f, "missing field `{}`", name),
            Reason::Failure(problem) => write!(f, "{}", problem),
            Reason::OneOf(errors) => {
                write!(f, "no accepted shape matched")?;
                for err in errors {
                    write!(f, "; {}", err.reason)?;
                }
                Ok(())
            }
        }
    }
}

impl<P: fmt::Display> fmt::Display for DecodeError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{} at {}", self.reason, self.at)
        } else {
            write!(f, "problem in `{}`: {} at {}", self.path_string(), self.reason, self.at)
        }
    }
}

impl<P: fmt::Debug + fmt::Display> std::error::Error for DecodeError<P> {}

/// Decode combinators over a parsed tree.
///
/// Every string in the tree already carries its unescaped value and its
/// source cursor, so decoding never goes back to the raw buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    pub fn new() -> Self {
        Decoder
    }

    pub fn string<'n, P>(&self, node: &'n Node) -> Result<&'n Str, DecodeError<P>> {
        match &node.value {
            Value::String(s) => Ok(s),
            _ => Err(DecodeError::expecting(node.start, Expected::String)),
        }
    }

    pub fn object<'n, P>(&self, node: &'n Node) -> Result<&'n [Entry], DecodeError<P>> {
        match &node.value {
            Value::Object(entries) => Ok(entries),
            _ => Err(DecodeError::expecting(node.start, Expected::Object)),
        }
    }

    /// Decode a string with `parse`, failing at the start of its text.
    pub fn custom_string<T, P>(
        &self,
        node: &Node,
        parse: impl FnOnce(&Str) -> Result<T, P>,
    ) -> Result<T, DecodeError<P>> {
        let s = self.string(node)?;
        parse(s).map_err(|problem| DecodeError::failure(s.start, problem))
    }

    /// Decode a string whose value must fit in `limit` bytes.
    pub fn bounded_string<P>(
        &self,
        node: &Node,
        limit: usize,
        too_long: impl FnOnce(Cursor) -> P,
    ) -> Result<String, DecodeError<P>> {
        let s = self.string(node)?;
        self.bounded(s, limit, too_long)
    }

    /// Run the bounded scanner over the unescaped bytes of a string or key.
    ///
    /// The budget applies to the value, so `\"` counts as one byte, the same
    /// length an encoder starts from. Failures point at the start of the
    /// string's text in the source.
    pub fn bounded<P>(
        &self,
        s: &Str,
        limit: usize,
        too_long: impl FnOnce(Cursor) -> P,
    ) -> Result<String, DecodeError<P>> {
        let value = s.value.as_bytes();
        let origin = Cursor { offset: 0, ..s.start };

        match scan::bounded(value, origin, value.len(), limit, |_| too_long(s.start)) {
            Ok(_) => Ok(s.value.clone()),
            Err((problem, _)) => Err(DecodeError::failure(s.start, problem)),
        }
    }

    /// Decode the value under `key`, which must be present.
    pub fn field<'n, T, P>(
        &self,
        node: &'n Node,
        key: &str,
        decode: impl FnOnce(&'n Node) -> Result<T, DecodeError<P>>,
    ) -> Result<T, DecodeError<P>> {
        let entries = self.object(node)?;
        let entry = entries
            .iter()
            .find(|entry| entry.key.value == key)
            .ok_or_else(|| DecodeError::new(node.start, Reason::MissingField(key.to_string())))?;

        decode(&entry.value).map_err(|err| err.within(Segment::Field(key.to_string())))
    }

    pub fn list<'n, T, P>(
        &self,
        node: &'n Node,
        mut item: impl FnMut(&'n Node) -> Result<T, DecodeError<P>>,
    ) -> Result<Vec<T>, DecodeError<P>> {
        let Value::Array(items) = &node.value else {
            return Err(DecodeError::expecting(node.start, Expected::Array));
        };

        items
            .iter()
            .enumerate()
            .map(|(index, node)| item(node).map_err(|err| err.within(Segment::Index(index))))
            .collect()
    }

    /// Decode every entry of an object, keeping source order.
    pub fn pairs<'n, K, V, P>(
        &self,
        node: &'n Node,
        mut key: impl FnMut(&'n Str) -> Result<K, DecodeError<P>>,
        mut value: impl FnMut(&'n Node) -> Result<V, DecodeError<P>>,
    ) -> Result<Vec<(K, V)>, DecodeError<P>> {
        let entries = self.object(node)?;

        entries
            .iter()
            .map(|entry| -> Result<(K, V), DecodeError<P>> {
                let k = key(&entry.key)?;
                let v = value(&entry.value)
                    .map_err(|err| err.within(Segment::Field(entry.key.value.clone())))?;
                Ok((k, v))
            })
            .collect()
    }

    /// Try each alternative in order; the first success wins.
    pub fn one_of<T, P>(
        &self,
        node: &Node,
        alternatives: &[&dyn Fn(&Node) -> Result<T, DecodeError<P>>],
    ) -> Result<T, DecodeError<P>> {
        let mut errors = Vec::with_capacity(alternatives.len());

        for alternative in alternatives {
            match alternative(node) {
                Ok(value) => return Ok(value),
                Err(err) => errors.push(err),
            }
        }

        Err(DecodeError::new(node.start, Reason::OneOf(errors)))
    }
}
