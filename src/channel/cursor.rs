//! Byte cursor and primitive field decoding.
//!
//! [`Cursor`] walks a channel file front to back. Every read consumes exactly
//! the width of its field and fails with
//! [`ChannelError::UnexpectedEndOfInput`] (leaving the position untouched)
//! when fewer bytes remain.
//!
//! | Field | Width | Encoding |
//! |-------|-------|----------|
//! | bool | 1 | `0` is false, anything else true |
//! | byte | 1 | unsigned |
//! | short | 2 | unsigned little-endian |
//! | long | 4 | unsigned little-endian |
//! | float | 4 | IEEE-754 single, little-endian |
//! | string | 4 + n | long length `n`, then `n` raw bytes |
//!
//! Marker lookahead goes through [`Cursor::peek`], which hands out a
//! [`Peeked`] token without moving the cursor. The caller either passes the
//! token to [`Cursor::commit`] to consume the bytes or drops it to leave them
//! in place.

use byteorder::{ByteOrder, LittleEndian};

use crate::channel::byte_string::ByteString;
use crate::channel::constants::*;
use crate::ChannelError;

/// Forward-only reader over an in-memory channel file.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

/// Bytes seen by [`Cursor::peek`] but not yet consumed.
#[must_use = "a peek is only consumed by passing it to Cursor::commit"]
#[derive(Debug, Clone, Copy)]
pub struct Peeked<'a> {
    offset: usize,
    bytes: &'a [u8],
}

impl<'a> Peeked<'a> {
    /// Offset of the first peeked byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true if the peeked bytes are exactly `tag`.
    pub fn matches(&self, tag: &[u8]) -> bool {
        self.bytes == tag
    }
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    /// Current byte offset from the start of the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the input.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the position and the end of the input.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    /// The whole underlying input, independent of the position.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    fn eof(&self, needed: usize) -> ChannelError {
        ChannelError::UnexpectedEndOfInput {
            offset: self.pos as u64,
            needed,
            available: self.remaining(),
            section: None,
        }
    }

    /// Consume exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ChannelError> {
        if n > self.remaining() {
            return Err(self.eof(n));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Consume a fixed-length byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ChannelError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_bool(&mut self) -> Result<bool, ChannelError> {
        Ok(self.read_bytes(SIZE_BOOL)?[0] != 0)
    }

    pub fn read_byte(&mut self) -> Result<u8, ChannelError> {
        Ok(self.read_bytes(SIZE_BYTE)?[0])
    }

    pub fn read_short(&mut self) -> Result<u16, ChannelError> {
        Ok(LittleEndian::read_u16(self.read_bytes(SIZE_SHORT)?))
    }

    pub fn read_long(&mut self) -> Result<u32, ChannelError> {
        Ok(LittleEndian::read_u32(self.read_bytes(SIZE_LONG)?))
    }

    pub fn read_float(&mut self) -> Result<f32, ChannelError> {
        Ok(LittleEndian::read_f32(self.read_bytes(SIZE_FLOAT)?))
    }

    /// Read a long length prefix followed by that many raw bytes.
    pub fn read_string(&mut self) -> Result<ByteString, ChannelError> {
        let len = self.read_long()? as usize;
        Ok(ByteString::from(self.read_bytes(len)?))
    }

    /// Look at the next `n` bytes without consuming them.
    pub fn peek(&self, n: usize) -> Result<Peeked<'a>, ChannelError> {
        if n > self.remaining() {
            return Err(self.eof(n));
        }
        Ok(Peeked {
            offset: self.pos,
            bytes: &self.data[self.pos..self.pos + n],
        })
    }

    /// Consume bytes previously returned by [`peek`](Self::peek).
    pub fn commit(&mut self, peeked: Peeked<'a>) {
        debug_assert_eq!(
            peeked.offset, self.pos,
            "committing a peek taken at a different position"
        );
        self.pos = peeked.offset + peeked.bytes.len();
    }

    /// Move the position back by `n` bytes.
    pub fn rewind(&mut self, n: usize) -> Result<(), ChannelError> {
        if n > self.pos {
            return Err(ChannelError::Argument(format!(
                "cannot rewind {} bytes from offset {}",
                n, self.pos
            )));
        }
        self.pos -= n;
        Ok(())
    }
}
