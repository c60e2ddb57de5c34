//! JSON reading with source positions.
//!
//! `parse` builds a spanned value tree, `decode` turns parts of that tree
//! into typed values with path-aware errors, and `scan` checks string
//! fields against a byte budget.

pub mod decode;
pub mod parse;
pub mod scan;

pub use decode::{DecodeError, Decoder, Expected, Reason, Segment};
pub use parse::{parse, Entry, Node, Str, SyntaxError, SyntaxProblem, Value};
pub use scan::Cursor;
