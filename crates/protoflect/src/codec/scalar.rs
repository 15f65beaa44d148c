// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire representation of scalar values, shared by sizing and encoding.

use crate::reflect::Value;
use crate::schema::FieldKind;
use crate::wire::{varint_length, zigzag_encode32, zigzag_encode64, WireWriter};

/// One scalar as it appears on the wire, minus its tag.
#[derive(Debug, Clone, Copy)]
pub(crate) enum WireScalar<'a> {
    Varint(u64),
    Fixed32(u32),
    Fixed64(u64),
    /// Length-prefixed payload (string or bytes).
    Bytes(&'a [u8]),
}

impl<'a> WireScalar<'a> {
    /// Map a value onto its wire form for `kind`.
    ///
    /// `None` when the value does not fit the kind (never for values stored
    /// through the type-checked record API) or for messages.
    pub(crate) fn of(kind: FieldKind, value: &'a Value) -> Option<Self> {
        let s = match (kind, value) {
            (FieldKind::Bool, Value::Bool(v)) => Self::Varint(u64::from(*v)),
            // Negative int32 and enum values are sign-extended to 10 bytes.
            (FieldKind::Int32, Value::I32(v)) => Self::Varint(i64::from(*v) as u64),
            (FieldKind::Enum, Value::Enum(v)) => Self::Varint(i64::from(*v) as u64),
            (FieldKind::Int64, Value::I64(v)) => Self::Varint(*v as u64),
            (FieldKind::Uint32, Value::U32(v)) => Self::Varint(u64::from(*v)),
            (FieldKind::Uint64, Value::U64(v)) => Self::Varint(*v),
            (FieldKind::Sint32, Value::I32(v)) => Self::Varint(u64::from(zigzag_encode32(*v))),
            (FieldKind::Sint64, Value::I64(v)) => Self::Varint(zigzag_encode64(*v)),
            (FieldKind::Fixed32, Value::U32(v)) => Self::Fixed32(*v),
            (FieldKind::Sfixed32, Value::I32(v)) => Self::Fixed32(*v as u32),
            (FieldKind::Float, Value::F32(v)) => Self::Fixed32(v.to_bits()),
            (FieldKind::Fixed64, Value::U64(v)) => Self::Fixed64(*v),
            (FieldKind::Sfixed64, Value::I64(v)) => Self::Fixed64(*v as u64),
            (FieldKind::Double, Value::F64(v)) => Self::Fixed64(v.to_bits()),
            (FieldKind::String, Value::String(v)) => Self::Bytes(v.as_bytes()),
            (FieldKind::Bytes, Value::Bytes(v)) => Self::Bytes(v),
            _ => return None,
        };
        Some(s)
    }

    /// Encoded length, length prefix included.
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Varint(v) => varint_length(*v),
            Self::Fixed32(_) => 4,
            Self::Fixed64(_) => 8,
            Self::Bytes(b) => varint_length(b.len() as u64) + b.len(),
        }
    }

    pub(crate) fn prepend(&self, w: &mut WireWriter) {
        match self {
            Self::Varint(v) => w.prepend_varint(*v),
            Self::Fixed32(v) => w.prepend_fixed32(*v),
            Self::Fixed64(v) => w.prepend_fixed64(*v),
            Self::Bytes(b) => {
                w.prepend_bytes(b);
                w.prepend_varint(b.len() as u64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_int32_is_ten_bytes() {
        let v = Value::I32(-1);
        let s = WireScalar::of(FieldKind::Int32, &v).expect("fits");
        assert_eq!(s.len(), 10);
        let s = WireScalar::of(FieldKind::Sint32, &v).expect("fits");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_mismatch_is_none() {
        assert!(WireScalar::of(FieldKind::Uint32, &Value::I32(1)).is_none());
        assert!(WireScalar::of(FieldKind::String, &Value::Bytes(vec![1])).is_none());
    }

    #[test]
    fn test_bytes_prefix() {
        let v = Value::from("addr1");
        let s = WireScalar::of(FieldKind::String, &v).expect("fits");
        assert_eq!(s.len(), 6);
        let mut w = WireWriter::with_exact_size(6);
        s.prepend(&mut w);
        assert_eq!(w.finish(), [5, b'a', b'd', b'd', b'r', b'1']);
    }
}
