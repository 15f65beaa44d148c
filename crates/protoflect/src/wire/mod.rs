// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Protobuf wire primitives: varints, tags, forward reader, backward writer.

pub mod reader;
pub mod tag;
pub mod varint;
pub mod writer;

pub use reader::WireReader;
pub use tag::{Tag, WireType};
pub use varint::{
    decode_varint, encode_varint, encode_varint_to_slice, varint_length, zigzag_decode32,
    zigzag_decode64, zigzag_encode32, zigzag_encode64,
};
pub use writer::WireWriter;

/// Encoded size of the tag for `field_number` (wire type does not change it).
#[inline]
pub const fn tag_length(field_number: u32) -> usize {
    varint_length((field_number as u64) << 3)
}
