//! Bounded field scanning.
//!
//! The JSON reader has already found where a string ends and what it holds;
//! the scanner only decides whether those bytes fit in a byte budget, and
//! moves the cursor accordingly.

use std::fmt;

/// A position in the source buffer.
///
/// Rows and columns are 1-based. Columns count bytes, not characters, so a
/// cursor can always be advanced by a byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub offset: usize,
    pub row: u32,
    pub col: u32,
}

impl Cursor {
    /// The first byte of a buffer.
    pub const START: Cursor = Cursor {
        offset: 0,
        row: 1,
        col: 1,
    };

    /// Move over `len` bytes that contain no line break.
    pub fn advance(self, len: usize) -> Cursor {
        Cursor {
            offset: self.offset + len,
            row: self.row,
            col: self.col.saturating_add(u32::try_from(len).unwrap_or(u32::MAX)),
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::START
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.row, self.col)
    }
}

/// Capture `src[cursor.offset..end]` if it is at most `limit` bytes long.
///
/// On success the captured bytes are returned with the cursor moved past
/// them. On failure nothing is consumed: `too_long` is called with the
/// starting cursor and that same cursor is handed back, so diagnostics point
/// at the start of the offending field.
pub fn bounded<'a, E>(
    src: &'a [u8],
    cursor: Cursor,
    end: usize,
    limit: usize,
    too_long: impl FnOnce(Cursor) -> E,
) -> Result<(&'a [u8], Cursor), (E, Cursor)> {
    let end = end.min(src.len());
    let start = cursor.offset.min(end);
    let len = end - start;

    if len > limit {
        return Err((too_long(cursor), cursor));
    }

    Ok((&src[start..end], cursor.advance(len)))
}
