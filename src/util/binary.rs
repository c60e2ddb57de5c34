//! Compact binary encoding for build cache records.
//!
//! Paths are written as a big-endian `u64` byte length followed by UTF-8
//! bytes. Sequences are a `u64` count followed by their items. Decoding never
//! guesses: anything unexpected is reported as [`CorruptCache`] and the
//! enclosing record is abandoned.

use std::path::PathBuf;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

/// A cache record that cannot be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptCache {
    #[error("corrupt cache: unknown tag {0}")]
    UnknownTag(u8),

    #[error("corrupt cache: record ends early")]
    Truncated,

    #[error("corrupt cache: path is not UTF-8")]
    NotUtf8,
}

/// A value with a binary cache form.
pub trait Binary: Sized {
    fn put(&self, buf: &mut impl BufMut);

    fn get(buf: &mut impl Buf) -> Result<Self, CorruptCache>;
}

/// Encode a value into a fresh buffer.
pub fn to_bytes<T: Binary>(value: &T) -> Bytes {
    let mut buf = BytesMut::new();
    value.put(&mut buf);
    buf.freeze()
}

/// Decode a value that must use up the whole buffer.
pub fn from_bytes<T: Binary>(mut bytes: &[u8]) -> Result<T, CorruptCache> {
    let value = T::get(&mut bytes)?;
    if bytes.has_remaining() {
        return Err(CorruptCache::Truncated);
    }
    Ok(value)
}

pub(crate) fn get_u8(buf: &mut impl Buf) -> Result<u8, CorruptCache> {
    if buf.remaining() < 1 {
        return Err(CorruptCache::Truncated);
    }
    Ok(buf.get_u8())
}

fn get_len(buf: &mut impl Buf) -> Result<usize, CorruptCache> {
    if buf.remaining() < 8 {
        return Err(CorruptCache::Truncated);
    }
    usize::try_from(buf.get_u64()).map_err(|_| CorruptCache::Truncated)
}

impl Binary for PathBuf {
    fn put(&self, buf: &mut impl BufMut) {
        let text = self.to_string_lossy();
        buf.put_u64(text.len() as u64);
        buf.put_slice(text.as_bytes());
    }

    fn get(buf: &mut impl Buf) -> Result<Self, CorruptCache> {
        let len = get_len(buf)?;
        if buf.remaining() < len {
            return Err(CorruptCache::Truncated);
        }
        let bytes = buf.copy_to_bytes(len);
        let text = std::str::from_utf8(&bytes).map_err(|_| CorruptCache::NotUtf8)?;
        Ok(PathBuf::from(text))
    }
}

impl<T: Binary> Binary for Vec<T> {
    fn put(&self, buf: &mut impl BufMut) {
        buf.put_u64(self.len() as u64);
        for item in self {
            item.put(buf);
        }
    }

    fn get(buf: &mut impl Buf) -> Result<Self, CorruptCache> {
        let len = get_len(buf)?;
        // Every item takes at least one byte, so a count above what is left
        // is already corrupt.
        if len > buf.remaining() {
            return Err(CorruptCache::Truncated);
        }
        (0..len).map(|_| T::get(buf)).collect()
    }
}
