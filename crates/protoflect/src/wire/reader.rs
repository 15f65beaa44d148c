// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounds-checked read cursor over protobuf wire data.

use super::tag::{Tag, WireType};
use super::varint::decode_varint;
use crate::config::DEFAULT_RECURSION_LIMIT;
use crate::error::{Error, Result};

/// Generate little-endian fixed-width reads.
///
/// Each generated method checks bounds (`TruncatedInput` on short buffer),
/// converts via `from_le_bytes()` and advances the offset.
macro_rules! impl_read_fixed {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Sequential reader over an immutable buffer.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Bytes consumed since `start` (an earlier [`offset`](Self::offset)).
    ///
    /// `None` when `start` lies past the current offset.
    pub fn slice_from(&self, start: usize) -> Option<&'a [u8]> {
        self.buffer.get(start..self.offset)
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, next) = decode_varint(self.buffer, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    /// Read a field tag.
    ///
    /// Fails with `IllegalTag` for field number 0, numbers above 2^29-1,
    /// the end-group wire type and the undefined wire types 6/7.
    pub fn read_tag(&mut self) -> Result<Tag> {
        let tag = self.read_any_tag()?;
        if tag.wire_type == WireType::EndGroup {
            return Err(Error::IllegalTag {
                field_number: u64::from(tag.field_number),
                wire_type: WireType::EndGroup as u8,
            });
        }
        Ok(tag)
    }

    fn read_any_tag(&mut self) -> Result<Tag> {
        let key = self.read_varint()?;
        Tag::from_key(key)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.offset.checked_add(len).ok_or(Error::InvalidLength)?;
        if end > self.buffer.len() {
            return Err(Error::TruncatedInput);
        }
        let slice = &self.buffer[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    impl_read_fixed!(read_fixed32, u32, 4);
    impl_read_fixed!(read_fixed64, u64, 8);

    /// Read a varint length prefix and return that many bytes.
    pub fn read_length_delimited(&mut self) -> Result<&'a [u8]> {
        let len = self.read_varint()?;
        if len > isize::MAX as u64 {
            return Err(Error::InvalidLength);
        }
        self.read_bytes(len as usize)
    }

    /// Consume the payload of a field whose tag was just read.
    ///
    /// Length-delimited content is skipped without being interpreted. A
    /// start group is skipped through its matching end group, with groups
    /// nested at most [`DEFAULT_RECURSION_LIMIT`] deep.
    pub fn skip_field(&mut self, tag: Tag) -> Result<()> {
        self.skip_field_within(tag, 0, DEFAULT_RECURSION_LIMIT)
    }

    /// [`skip_field`](Self::skip_field) for a field found at nesting level
    /// `depth`. Opening a group at `depth >= limit` fails with
    /// `RecursionLimitExceeded`.
    pub fn skip_field_within(&mut self, tag: Tag, depth: usize, limit: usize) -> Result<()> {
        self.skip_payload(tag, depth, limit)
    }

    fn skip_payload(&mut self, tag: Tag, depth: usize, limit: usize) -> Result<()> {
        match tag.wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.read_bytes(8)?;
            }
            WireType::LengthDelimited => {
                self.read_length_delimited()?;
            }
            WireType::Fixed32 => {
                self.read_bytes(4)?;
            }
            WireType::StartGroup => {
                if depth >= limit {
                    return Err(Error::RecursionLimitExceeded { limit });
                }
                self.skip_group(tag.field_number, depth + 1, limit)?;
            }
            WireType::EndGroup => {
                return Err(Error::IllegalTag {
                    field_number: u64::from(tag.field_number),
                    wire_type: WireType::EndGroup as u8,
                });
            }
        }
        Ok(())
    }

    fn skip_group(&mut self, field_number: u32, depth: usize, limit: usize) -> Result<()> {
        loop {
            if self.is_eof() {
                return Err(Error::TruncatedInput);
            }
            let inner = self.read_any_tag()?;
            if inner.wire_type == WireType::EndGroup {
                if inner.field_number != field_number {
                    return Err(Error::IllegalTag {
                        field_number: u64::from(inner.field_number),
                        wire_type: WireType::EndGroup as u8,
                    });
                }
                return Ok(());
            }
            self.skip_payload(inner, depth, limit)?;
        }
    }
}
