// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field values: owned [`Value`] and borrowed [`ValueRef`].

use super::field::AsField;
use super::list::ListView;
use super::record::Record;
use crate::error::{Error, Result};
use crate::schema::{FieldDescriptor, FieldKind, MessageType};

/// An owned field value.
///
/// Scalar variants map onto field kinds by representation: `I32` serves
/// `int32`, `sint32` and `sfixed32`; `U64` serves `uint64` and `fixed64`;
/// and so on. Floats compare by bit pattern, so `NaN == NaN` and
/// `-0.0 != 0.0`.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Enum number; values outside the declared set are kept as-is.
    Enum(i32),
    Message(Record),
    /// Elements of a repeated field.
    List(Vec<Value>),
}

impl Value {
    /// Zero value of a scalar kind; `None` for messages.
    pub fn default_for(kind: FieldKind) -> Option<Value> {
        let v = match kind {
            FieldKind::Bool => Value::Bool(false),
            FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32 => Value::I32(0),
            FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64 => Value::I64(0),
            FieldKind::Uint32 | FieldKind::Fixed32 => Value::U32(0),
            FieldKind::Uint64 | FieldKind::Fixed64 => Value::U64(0),
            FieldKind::Float => Value::F32(0.0),
            FieldKind::Double => Value::F64(0.0),
            FieldKind::String => Value::String(String::new()),
            FieldKind::Bytes => Value::Bytes(Vec::new()),
            FieldKind::Enum => Value::Enum(0),
            FieldKind::Message => return None,
        };
        Some(v)
    }

    /// Short name of the variant, used in type errors.
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Enum(_) => "enum",
            Self::Message(_) => "message",
            Self::List(_) => "list",
        }
    }

    /// Whether this variant represents values of `kind`.
    pub(crate) fn fits_kind(&self, kind: FieldKind) -> bool {
        matches!(
            (kind, self),
            (FieldKind::Bool, Self::Bool(_))
                | (
                    FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32,
                    Self::I32(_)
                )
                | (
                    FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64,
                    Self::I64(_)
                )
                | (FieldKind::Uint32 | FieldKind::Fixed32, Self::U32(_))
                | (FieldKind::Uint64 | FieldKind::Fixed64, Self::U64(_))
                | (FieldKind::Float, Self::F32(_))
                | (FieldKind::Double, Self::F64(_))
                | (FieldKind::String, Self::String(_))
                | (FieldKind::Bytes, Self::Bytes(_))
                | (FieldKind::Enum, Self::Enum(_))
                | (FieldKind::Message, Self::Message(_))
        )
    }

    /// Zero value of an implicit-presence scalar.
    ///
    /// Floats compare by bit pattern, so `-0.0` is not a default.
    pub(crate) fn is_default(&self) -> bool {
        match self {
            Self::Bool(v) => !*v,
            Self::I32(v) | Self::Enum(v) => *v == 0,
            Self::I64(v) => *v == 0,
            Self::U32(v) => *v == 0,
            Self::U64(v) => *v == 0,
            Self::F32(v) => v.to_bits() == 0,
            Self::F64(v) => v.to_bits() == 0,
            Self::String(v) => v.is_empty(),
            Self::Bytes(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Message(_) => false,
        }
    }

    /// Borrow as a [`ValueRef`].
    pub fn view(&self) -> ValueRef<'_> {
        match self {
            Self::Bool(v) => ValueRef::Bool(*v),
            Self::I32(v) => ValueRef::I32(*v),
            Self::I64(v) => ValueRef::I64(*v),
            Self::U32(v) => ValueRef::U32(*v),
            Self::U64(v) => ValueRef::U64(*v),
            Self::F32(v) => ValueRef::F32(*v),
            Self::F64(v) => ValueRef::F64(*v),
            Self::String(v) => ValueRef::String(v),
            Self::Bytes(v) => ValueRef::Bytes(v),
            Self::Enum(v) => ValueRef::Enum(*v),
            Self::Message(r) => ValueRef::Message(MessageView::present(r)),
            Self::List(items) => ValueRef::List(ListView::new(items)),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Record> {
        match self {
            Self::Message(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_message_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Message(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

macro_rules! impl_from_value {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Value {
            fn from(v: $type) -> Self {
                Value::$variant(v)
            }
        }
    };
}

impl_from_value!(bool, Bool);
impl_from_value!(i32, I32);
impl_from_value!(i64, I64);
impl_from_value!(u32, U32);
impl_from_value!(u64, U64);
impl_from_value!(f32, F32);
impl_from_value!(f64, F64);
impl_from_value!(String, String);
impl_from_value!(Vec<u8>, Bytes);
impl_from_value!(Record, Message);
impl_from_value!(Vec<Value>, List);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I32(a), Self::I32(b)) | (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a.to_bits() == b.to_bits(),
            (Self::F64(a), Self::F64(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Message(a), Self::Message(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

/// A borrowed field value.
///
/// Returned by [`Record::get`]. Unpopulated fields read as their zero value,
/// an empty [`MessageView`] or an empty [`ListView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValueRef<'a> {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(&'a str),
    Bytes(&'a [u8]),
    Enum(i32),
    Message(MessageView<'a>),
    List(ListView<'a>),
}

impl<'a> ValueRef<'a> {
    /// Copy into an owned [`Value`].
    pub fn to_value(&self) -> Value {
        match self {
            Self::Bool(v) => Value::Bool(*v),
            Self::I32(v) => Value::I32(*v),
            Self::I64(v) => Value::I64(*v),
            Self::U32(v) => Value::U32(*v),
            Self::U64(v) => Value::U64(*v),
            Self::F32(v) => Value::F32(*v),
            Self::F64(v) => Value::F64(*v),
            Self::String(v) => Value::String((*v).to_string()),
            Self::Bytes(v) => Value::Bytes(v.to_vec()),
            Self::Enum(v) => Value::Enum(*v),
            Self::Message(m) => Value::Message(m.to_record()),
            Self::List(l) => Value::List(l.to_vec()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<i32> {
        match self {
            Self::Enum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageView<'a>> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<ListView<'a>> {
        match self {
            Self::List(l) => Some(*l),
            _ => None,
        }
    }
}

/// Read-only view of a message-typed field.
///
/// Backed by the nested record when present. An absent message reads as an
/// empty record of the field's type; there is nothing to mutate through it.
#[derive(Debug, Clone)]
pub struct MessageView<'a> {
    ty: MessageType,
    record: Option<&'a Record>,
}

impl<'a> MessageView<'a> {
    pub(crate) fn present(record: &'a Record) -> Self {
        Self {
            ty: record.message_type().clone(),
            record: Some(record),
        }
    }

    pub(crate) fn absent(ty: MessageType) -> Self {
        Self { ty, record: None }
    }

    pub fn is_present(&self) -> bool {
        self.record.is_some()
    }

    pub fn message_type(&self) -> &MessageType {
        &self.ty
    }

    /// The nested record, if one exists.
    pub fn record(&self) -> Option<&'a Record> {
        self.record
    }

    pub fn has<F: AsField>(&self, field: F) -> Result<bool> {
        match self.record {
            Some(r) => r.has(field),
            None => field.resolve(self.ty.descriptor()).map(|_| false),
        }
    }

    pub fn get<F: AsField>(&self, field: F) -> Result<ValueRef<'a>> {
        match self.record {
            Some(r) => r.get(field),
            None => {
                let fd = field.resolve(self.ty.descriptor())?;
                default_ref(&self.ty, fd)
            }
        }
    }

    /// Owned copy (an empty record when absent).
    pub fn to_record(&self) -> Record {
        match self.record {
            Some(r) => r.clone(),
            None => Record::new(&self.ty),
        }
    }
}

impl PartialEq for MessageView<'_> {
    fn eq(&self, other: &Self) -> bool {
        if self.ty.full_name() != other.ty.full_name() {
            return false;
        }
        match (self.record, other.record) {
            (Some(a), Some(b)) => a == b,
            (Some(r), None) | (None, Some(r)) => !r.is_populated(),
            (None, None) => true,
        }
    }
}

/// Message type of a message-kind field of `ty`.
pub(crate) fn field_message_type(ty: &MessageType, fd: &FieldDescriptor) -> Result<MessageType> {
    ty.field_type(fd).ok_or_else(|| Error::TypeMismatch {
        field: fd.full_name().to_string(),
        expected: "message".to_string(),
        found: fd.kind().to_string(),
    })
}

/// Value read for an unpopulated field.
pub(crate) fn default_ref<'a>(ty: &MessageType, fd: &FieldDescriptor) -> Result<ValueRef<'a>> {
    if fd.is_repeated() {
        return Ok(ValueRef::List(ListView::empty()));
    }
    let v = match fd.kind() {
        FieldKind::Bool => ValueRef::Bool(false),
        FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32 => ValueRef::I32(0),
        FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64 => ValueRef::I64(0),
        FieldKind::Uint32 | FieldKind::Fixed32 => ValueRef::U32(0),
        FieldKind::Uint64 | FieldKind::Fixed64 => ValueRef::U64(0),
        FieldKind::Float => ValueRef::F32(0.0),
        FieldKind::Double => ValueRef::F64(0.0),
        FieldKind::String => ValueRef::String(""),
        FieldKind::Bytes => ValueRef::Bytes(&[]),
        FieldKind::Enum => ValueRef::Enum(0),
        FieldKind::Message => ValueRef::Message(MessageView::absent(field_message_type(ty, fd)?)),
    };
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_presence() {
        assert!(Value::from(0i32).is_default());
        assert!(Value::from("").is_default());
        assert!(!Value::from(-0.0f64).is_default());
        assert!(Value::from(0.0f32).is_default());
        assert!(!Value::Enum(3).is_default());
        assert_eq!(Value::default_for(FieldKind::Sfixed64), Some(Value::I64(0)));
        assert_eq!(Value::default_for(FieldKind::Message), None);
    }

    #[test]
    fn test_fits_kind() {
        assert!(Value::I32(1).fits_kind(FieldKind::Sint32));
        assert!(Value::U64(1).fits_kind(FieldKind::Fixed64));
        assert!(!Value::I32(1).fits_kind(FieldKind::Uint32));
        assert!(!Value::Enum(1).fits_kind(FieldKind::Int32));
        assert!(!Value::List(vec![]).fits_kind(FieldKind::Int32));
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
        assert_ne!(Value::F32(-0.0), Value::F32(0.0));
        assert_ne!(Value::I32(1), Value::Enum(1));
    }

    #[test]
    fn test_view_roundtrip() {
        let v = Value::List(vec![Value::from("a"), Value::from("b")]);
        let r = v.view();
        assert_eq!(r.as_list().map(|l| l.len()), Some(2));
        assert_eq!(r.to_value(), v);
        assert_eq!(Value::from(&b"xy"[..]).view().as_bytes(), Some(&b"xy"[..]));
    }
}
