// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Backward writer for size-first serialization.
//!
//! # Contract
//!
//! The writer owns a buffer allocated to the exact serialized size and fills
//! it from the **end toward the start**. Every `prepend_*` call places bytes
//! immediately before everything written so far, so callers emit:
//!
//! - fields in **descending** field-number order,
//! - repeated elements last-to-first,
//! - for each length-delimited field: payload, then length, then tag.
//!
//! Read forward, the result is canonical: ascending field numbers, each tag
//! followed by its length and payload. A nested message is written in place
//! and its length is known from [`WireWriter::written`] once its payload is
//! down, so no child is sized or copied twice.
//!
//! Running out of room means the size pass undercounted. That is an
//! invariant violation and panics instead of emitting truncated bytes.

use super::tag::{Tag, WireType};
use super::varint::{encode_varint_to_slice, varint_length};

/// Generate little-endian fixed-width prepends.
macro_rules! impl_prepend_fixed {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self, value: $type) {
            self.claim($size).copy_from_slice(&value.to_le_bytes());
        }
    };
}

/// Exact-size buffer filled from the tail.
#[derive(Debug)]
pub struct WireWriter {
    buffer: Vec<u8>,
    /// Start of the written region; `buffer[start..]` is final output.
    start: usize,
}

impl WireWriter {
    /// Allocate exactly `size` bytes.
    pub fn with_exact_size(size: usize) -> Self {
        Self {
            buffer: vec![0u8; size],
            start: size,
        }
    }

    /// Free space left in front of the written region.
    pub fn remaining(&self) -> usize {
        self.start
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.buffer.len() - self.start
    }

    fn claim(&mut self, n: usize) -> &mut [u8] {
        assert!(
            n <= self.start,
            "wire writer underflow: need {} bytes, {} left (size pass undercounted)",
            n,
            self.start
        );
        self.start -= n;
        &mut self.buffer[self.start..self.start + n]
    }

    pub fn prepend_bytes(&mut self, data: &[u8]) {
        self.claim(data.len()).copy_from_slice(data);
    }

    pub fn prepend_varint(&mut self, value: u64) {
        let dst = self.claim(varint_length(value));
        encode_varint_to_slice(value, dst);
    }

    pub fn prepend_tag(&mut self, field_number: u32, wire_type: WireType) {
        self.prepend_varint(Tag::new(field_number, wire_type).key());
    }

    impl_prepend_fixed!(prepend_fixed32, u32, 4);
    impl_prepend_fixed!(prepend_fixed64, u64, 8);

    /// Prepend `payload`, its length and its tag as one length-delimited field.
    pub fn prepend_length_delimited(&mut self, field_number: u32, payload: &[u8]) {
        self.prepend_bytes(payload);
        self.prepend_varint(payload.len() as u64);
        self.prepend_tag(field_number, WireType::LengthDelimited);
    }

    /// Return the filled buffer.
    ///
    /// Panics if the buffer is not completely filled (size pass overcounted).
    pub fn finish(self) -> Vec<u8> {
        assert_eq!(
            self.start, 0,
            "wire writer not full: {} bytes unwritten (size pass overcounted)",
            self.start
        );
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_fields_read_ascending() {
        // field 2 then field 1 written backward => 0x0a.. then 0x12.. forward.
        let mut w = WireWriter::with_exact_size(14);
        w.prepend_length_delimited(2, b"addr2");
        w.prepend_length_delimited(1, b"addr1");
        assert_eq!(w.remaining(), 0);
        assert_eq!(
            w.finish(),
            [0x0A, 5, b'a', b'd', b'd', b'r', b'1', 0x12, 5, b'a', b'd', b'd', b'r', b'2']
        );
    }

    #[test]
    fn test_nested_length_from_written() {
        let mut w = WireWriter::with_exact_size(5);
        let mark = w.written();
        w.prepend_varint(300);
        w.prepend_tag(1, WireType::Varint);
        let inner = w.written() - mark;
        w.prepend_varint(inner as u64);
        w.prepend_tag(4, WireType::LengthDelimited);
        assert_eq!(w.finish(), [0x22, 0x03, 0x08, 0xAC, 0x02]);
    }

    #[test]
    fn test_fixed_prepends() {
        let mut w = WireWriter::with_exact_size(12);
        w.prepend_fixed64(0x0102_0304_0506_0708);
        w.prepend_fixed32(0xAABB_CCDD);
        assert_eq!(
            w.finish(),
            [0xDD, 0xCC, 0xBB, 0xAA, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    #[should_panic(expected = "underflow")]
    fn test_underflow_panics() {
        let mut w = WireWriter::with_exact_size(1);
        w.prepend_bytes(b"ab");
    }

    #[test]
    #[should_panic(expected = "not full")]
    fn test_unfilled_finish_panics() {
        let mut w = WireWriter::with_exact_size(3);
        w.prepend_bytes(b"a");
        let _ = w.finish();
    }
}
