// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Base-128 varints and zigzag mapping.
//!
//! Little-endian groups of 7 bits; every byte except the last carries the
//! continuation bit (0x80).

use crate::config::MAX_VARINT_LEN;
use crate::error::{Error, Result};

/// Append the varint encoding of `value` to `out`.
pub fn encode_varint(value: u64, out: &mut Vec<u8>) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let n = encode_varint_to_slice(value, &mut buf);
    out.extend_from_slice(&buf[..n]);
}

/// Write the varint encoding of `value` at the start of `dst`.
///
/// Returns the number of bytes written. `dst` must hold at least
/// [`varint_length`]`(value)` bytes.
pub fn encode_varint_to_slice(mut value: u64, dst: &mut [u8]) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        dst[i] = (value as u8 & 0x7F) | 0x80;
        value >>= 7;
        i += 1;
    }
    dst[i] = value as u8;
    i + 1
}

/// Decode a varint starting at `pos`.
///
/// Returns `(value, new_pos)`.
pub fn decode_varint(buffer: &[u8], pos: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    let mut i = pos;
    loop {
        if shift >= 64 {
            return Err(Error::IntegerOverflow);
        }
        let Some(&b) = buffer.get(i) else {
            return Err(Error::TruncatedInput);
        };
        i += 1;
        // The tenth byte may only carry bit 63.
        if shift == 63 && b > 1 {
            return Err(Error::IntegerOverflow);
        }
        value |= u64::from(b & 0x7F) << shift;
        if b < 0x80 {
            return Ok((value, i));
        }
        shift += 7;
    }
}

/// Number of bytes [`encode_varint`] produces for `value`.
#[inline]
pub const fn varint_length(value: u64) -> usize {
    // 1 + floor(bit_length / 7), with value 0 taking one byte.
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

#[inline]
pub const fn zigzag_encode32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

#[inline]
pub const fn zigzag_decode32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

#[inline]
pub const fn zigzag_encode64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline]
pub const fn zigzag_decode64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_known_encodings() {
        let mut out = Vec::new();
        encode_varint(0, &mut out);
        assert_eq!(out, [0x00]);

        out.clear();
        encode_varint(1, &mut out);
        assert_eq!(out, [0x01]);

        out.clear();
        encode_varint(300, &mut out);
        assert_eq!(out, [0xAC, 0x02]);

        out.clear();
        encode_varint(u64::MAX, &mut out);
        assert_eq!(out.len(), MAX_VARINT_LEN);
        assert_eq!(out[9], 0x01);
    }

    #[test]
    fn test_varint_length_matches_encoding() {
        let samples = [
            0u64,
            1,
            127,
            128,
            16_383,
            16_384,
            (1 << 21) - 1,
            1 << 21,
            (1 << 35) + 7,
            1 << 56,
            (1 << 63) - 1,
            u64::MAX,
        ];
        for v in samples {
            let mut out = Vec::new();
            encode_varint(v, &mut out);
            assert_eq!(varint_length(v), out.len(), "length of {}", v);
            assert_eq!(decode_varint(&out, 0).expect("decode"), (v, out.len()));
        }
    }

    #[test]
    fn test_decode_varint_from_offset() {
        let buf = [0xFF, 0xAC, 0x02, 0x05];
        assert_eq!(decode_varint(&buf, 1).expect("decode"), (300, 3));
        assert_eq!(decode_varint(&buf, 3).expect("decode"), (5, 4));
    }

    #[test]
    fn test_decode_varint_truncated() {
        assert!(matches!(decode_varint(&[], 0), Err(Error::TruncatedInput)));
        assert!(matches!(
            decode_varint(&[0x80, 0x80], 0),
            Err(Error::TruncatedInput)
        ));
        assert!(matches!(decode_varint(&[0x01], 1), Err(Error::TruncatedInput)));
    }

    #[test]
    fn test_decode_varint_overflow() {
        let buf = [0xFFu8; 11];
        assert!(matches!(decode_varint(&buf, 0), Err(Error::IntegerOverflow)));

        // Ten continuation bytes then a terminator: shift reaches 70.
        let mut buf = vec![0x80u8; 10];
        buf.push(0x01);
        assert!(matches!(decode_varint(&buf, 0), Err(Error::IntegerOverflow)));
    }

    #[test]
    fn test_decode_varint_tenth_byte_bits() {
        let mut buf = vec![0xFFu8; 9];
        buf.push(0x7F);
        assert!(matches!(decode_varint(&buf, 0), Err(Error::IntegerOverflow)));
        buf[9] = 0x02;
        assert!(matches!(decode_varint(&buf, 0), Err(Error::IntegerOverflow)));

        buf[9] = 0x01;
        assert_eq!(decode_varint(&buf, 0).expect("u64::MAX"), (u64::MAX, 10));
        let mut out = Vec::new();
        encode_varint(u64::MAX, &mut out);
        assert_eq!(out, buf);
    }

    #[test]
    fn test_zigzag() {
        assert_eq!(zigzag_encode32(0), 0);
        assert_eq!(zigzag_encode32(-1), 1);
        assert_eq!(zigzag_encode32(1), 2);
        assert_eq!(zigzag_encode32(i32::MIN), u32::MAX);
        assert_eq!(zigzag_decode32(u32::MAX), i32::MIN);
        assert_eq!(zigzag_encode64(-2), 3);
        assert_eq!(zigzag_decode64(3), -2);
        assert_eq!(zigzag_decode64(zigzag_encode64(i64::MAX)), i64::MAX);
    }
}
