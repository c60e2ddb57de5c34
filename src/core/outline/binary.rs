//! Cache encoding for source directories: a tag byte then the path.
//!
//! Tag 0 is absolute and tag 1 is relative. Any other tag is returned as
//! [`CorruptCache::UnknownTag`] rather than panicking, and `?` carries it out
//! of the enclosing decode, so one bad record fails the whole cache read.

use std::path::PathBuf;

use bytes::{Buf, BufMut};

use crate::util::binary::{get_u8, Binary, CorruptCache};

use super::SrcDir;

const TAG_ABSOLUTE: u8 = 0;
const TAG_RELATIVE: u8 = 1;

impl Binary for SrcDir {
    fn put(&self, buf: &mut impl BufMut) {
        let (tag, path) = match self {
            SrcDir::Absolute(path) => (TAG_ABSOLUTE, path),
            SrcDir::Relative(path) => (TAG_RELATIVE, path),
        };
        buf.put_u8(tag);
        path.put(buf);
    }

    fn get(buf: &mut impl Buf) -> Result<Self, CorruptCache> {
        match get_u8(buf)? {
            TAG_ABSOLUTE => PathBuf::get(buf).map(SrcDir::Absolute),
            TAG_RELATIVE => PathBuf::get(buf).map(SrcDir::Relative),
            tag => Err(CorruptCache::UnknownTag(tag)),
        }
    }
}
