// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field kinds and cardinality.

use crate::wire::WireType;
use std::fmt;

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Enum,
    Fixed64,
    Sfixed64,
    Double,
    String,
    Bytes,
    Message,
    Fixed32,
    Sfixed32,
    Float,
}

impl FieldKind {
    /// Wire type of a single (unpacked) value of this kind.
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::Bool
            | Self::Int32
            | Self::Int64
            | Self::Uint32
            | Self::Uint64
            | Self::Sint32
            | Self::Sint64
            | Self::Enum => WireType::Varint,
            Self::Fixed64 | Self::Sfixed64 | Self::Double => WireType::Fixed64,
            Self::String | Self::Bytes | Self::Message => WireType::LengthDelimited,
            Self::Fixed32 | Self::Sfixed32 | Self::Float => WireType::Fixed32,
        }
    }

    /// Numeric kinds that may be packed when repeated.
    pub fn is_packable(&self) -> bool {
        !matches!(self, Self::String | Self::Bytes | Self::Message)
    }

    pub fn is_message(&self) -> bool {
        matches!(self, Self::Message)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum)
    }

    /// Schema-file spelling (`int32`, `sfixed64`, `message`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Enum => "enum",
            Self::Fixed64 => "fixed64",
            Self::Sfixed64 => "sfixed64",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Message => "message",
            Self::Fixed32 => "fixed32",
            Self::Sfixed32 => "sfixed32",
            Self::Float => "float",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => Self::Bool,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "sint32" => Self::Sint32,
            "sint64" => Self::Sint64,
            "enum" => Self::Enum,
            "fixed64" => Self::Fixed64,
            "sfixed64" => Self::Sfixed64,
            "double" => Self::Double,
            "string" => Self::String,
            "bytes" => Self::Bytes,
            "message" => Self::Message,
            "fixed32" => Self::Fixed32,
            "sfixed32" => Self::Sfixed32,
            "float" => Self::Float,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Singular or repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    #[default]
    Singular,
    Repeated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_types() {
        assert_eq!(FieldKind::Sint64.wire_type(), WireType::Varint);
        assert_eq!(FieldKind::Enum.wire_type(), WireType::Varint);
        assert_eq!(FieldKind::Double.wire_type(), WireType::Fixed64);
        assert_eq!(FieldKind::Message.wire_type(), WireType::LengthDelimited);
        assert_eq!(FieldKind::Float.wire_type(), WireType::Fixed32);
    }

    #[test]
    fn test_name_roundtrip_and_packable() {
        for kind in [
            FieldKind::Bool,
            FieldKind::Uint64,
            FieldKind::Sfixed32,
            FieldKind::Bytes,
            FieldKind::Message,
        ] {
            assert_eq!(FieldKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(FieldKind::from_name("map"), None);
        assert!(FieldKind::Fixed64.is_packable());
        assert!(!FieldKind::String.is_packable());
    }
}
