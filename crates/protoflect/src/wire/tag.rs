// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire types and field tags.

use crate::config::{MAX_FIELD_NUMBER, MIN_FIELD_NUMBER};
use crate::error::{Error, Result};
use std::fmt;

/// Low three bits of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// int32, int64, uint32, uint64, sint32, sint64, bool, enum.
    Varint = 0,
    /// fixed64, sfixed64, double.
    Fixed64 = 1,
    /// string, bytes, messages, packed repeated fields.
    LengthDelimited = 2,
    /// Group start (proto2 legacy, skipped only).
    StartGroup = 3,
    /// Group end (never starts a field).
    EndGroup = 4,
    /// fixed32, sfixed32, float.
    Fixed32 = 5,
}

impl WireType {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Varint),
            1 => Some(Self::Fixed64),
            2 => Some(Self::LengthDelimited),
            3 => Some(Self::StartGroup),
            4 => Some(Self::EndGroup),
            5 => Some(Self::Fixed32),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Varint => "VARINT",
            Self::Fixed64 => "I64",
            Self::LengthDelimited => "LEN",
            Self::StartGroup => "SGROUP",
            Self::EndGroup => "EGROUP",
            Self::Fixed32 => "I32",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded `(field_number, wire_type)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    pub const fn new(field_number: u32, wire_type: WireType) -> Self {
        Self {
            field_number,
            wire_type,
        }
    }

    /// Packed key: `(field_number << 3) | wire_type`.
    #[inline]
    pub const fn key(&self) -> u64 {
        ((self.field_number as u64) << 3) | self.wire_type as u64
    }

    /// Split a raw key, accepting any wire type 0..=5 (end-group included).
    ///
    /// Field number range is enforced; wire types 6 and 7 are rejected.
    pub fn from_key(key: u64) -> Result<Self> {
        let field_number = key >> 3;
        let raw_type = (key & 0x7) as u8;
        let illegal = Error::IllegalTag {
            field_number,
            wire_type: raw_type,
        };
        if field_number < u64::from(MIN_FIELD_NUMBER) || field_number > u64::from(MAX_FIELD_NUMBER)
        {
            return Err(illegal);
        }
        let wire_type = WireType::from_u8(raw_type).ok_or(illegal)?;
        Ok(Self {
            field_number: field_number as u32,
            wire_type,
        })
    }
}
