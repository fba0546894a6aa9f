//! Field-level wire primitives shared by every command encoder/decoder.
//!
//! Strings carry a 1-byte length prefix (0-255 bytes, no terminator);
//! lists and maps carry a 1-byte element count. Multi-byte integers are
//! big-endian.

use std::collections::HashMap;

use bytes::{BufMut, BytesMut};

use crate::error::{Result, WireError};

/// Maximum encoded length of a single string, in bytes.
pub const MAX_STRING_LEN: usize = 255;

/// Maximum element count of a list or map.
pub const MAX_ENTRIES: usize = 255;

pub(crate) fn put_string(dst: &mut BytesMut, value: &str) -> Result<()> {
    let len = value.len();
    if len > MAX_STRING_LEN {
        return Err(WireError::StringTooLong { len });
    }
    dst.put_u8(len as u8);
    dst.put_slice(value.as_bytes());
    Ok(())
}

pub(crate) fn put_string_list(dst: &mut BytesMut, values: &[String]) -> Result<()> {
    if values.len() > MAX_ENTRIES {
        return Err(WireError::TooManyEntries {
            count: values.len(),
        });
    }
    dst.put_u8(values.len() as u8);
    for value in values {
        put_string(dst, value)?;
    }
    Ok(())
}

pub(crate) fn put_string_map(dst: &mut BytesMut, map: &HashMap<String, String>) -> Result<()> {
    if map.len() > MAX_ENTRIES {
        return Err(WireError::TooManyEntries { count: map.len() });
    }
    dst.put_u8(map.len() as u8);
    for (key, value) in map {
        put_string(dst, key)?;
        put_string(dst, value)?;
    }
    Ok(())
}

/// Cursor over one frame's bytes with exact-length checks.
///
/// Every read either consumes exactly the declared bytes or fails;
/// nothing is consumed on failure paths past the first short read.
pub(crate) struct FrameCursor<'a> {
    buf: &'a [u8],
}

impl<'a> FrameCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.buf.len() < n {
            return Err(WireError::TruncatedFrame {
                needed: n,
                remaining: self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn get_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn get_string(&mut self) -> Result<String> {
        let len = self.get_u8()? as usize;
        if self.buf.len() < len {
            return Err(WireError::InvalidLength {
                length: len,
                remaining: self.buf.len(),
            });
        }
        let bytes = self.take(len)?;
        Ok(std::str::from_utf8(bytes)?.to_string())
    }

    pub fn get_string_list(&mut self) -> Result<Vec<String>> {
        let count = self.get_u8()? as usize;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.get_string()?);
        }
        Ok(values)
    }

    pub fn get_string_map(&mut self) -> Result<HashMap<String, String>> {
        let count = self.get_u8()? as usize;
        let mut map = HashMap::with_capacity(count);
        for _ in 0..count {
            let key = self.get_string()?;
            let value = self.get_string()?;
            if map.contains_key(&key) {
                return Err(WireError::DuplicateHeaderKey(key));
            }
            map.insert(key, value);
        }
        Ok(map)
    }
}
