// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-typed record with reflective field access.

use super::field::AsField;
use super::list::ListMut;
use super::value::{default_ref, field_message_type, Value, ValueRef};
use crate::error::{Error, Result};
use crate::schema::{FieldDescriptor, MessageDescriptor, MessageType};
use crate::wire::WireReader;
use std::fmt;

/// One instance of a message type.
///
/// Holds one slot per declared field plus the raw bytes of fields the schema
/// does not know. Implicit-presence scalars are stored only when they differ
/// from their zero value; explicit-presence fields (messages, oneof members,
/// `optional` scalars) are stored whenever set.
///
/// # Example
///
/// ```rust
/// use protoflect::{schemas::authz, Record};
///
/// let ty = authz::query_grants_request();
/// let mut req = Record::new(&ty);
/// req.set("granter", "addr1").unwrap();
/// req.mutable_message("pagination").unwrap().set("limit", 10u64).unwrap();
///
/// assert!(req.has("granter").unwrap());
/// assert!(!req.has("grantee").unwrap());
/// assert_eq!(req.get("granter").unwrap().as_str(), Some("addr1"));
/// ```
#[derive(Clone)]
pub struct Record {
    ty: MessageType,
    values: Vec<Option<Value>>,
    unknown: Vec<u8>,
}

/// Mutable handle to a composite field.
#[derive(Debug)]
pub enum MutableRef<'a> {
    Message(&'a mut Record),
    List(ListMut<'a>),
}

/// One populated field handed out by [`Record::range_mut`].
///
/// Writes go through the same type checks as [`Record::set`].
#[derive(Debug)]
pub struct FieldMut<'a> {
    ty: &'a MessageType,
    field: &'a FieldDescriptor,
    slot: &'a mut Option<Value>,
}

impl<'a> FieldMut<'a> {
    pub fn field(&self) -> &FieldDescriptor {
        self.field
    }

    /// Current value; the zero value once cleared.
    pub fn get(&self) -> Result<ValueRef<'_>> {
        match self.slot.as_ref().filter(|v| slot_populated(v)) {
            Some(value) => Ok(value.view()),
            None => default_ref(self.ty, self.field),
        }
    }

    /// Replace the value. Setting an implicit-presence scalar to its zero
    /// value clears it.
    pub fn set(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let element_type = resolved_element_type(self.ty, self.field)?;
        check_value(self.field, element_type.as_ref(), &value)?;
        *self.slot = presence_filtered(self.field, value);
        Ok(())
    }

    pub fn clear(&mut self) {
        *self.slot = None;
    }

    /// Mutable access to a message or repeated field, re-allocating it if
    /// it was cleared. Scalars fail with [`Error::NotMutable`].
    pub fn mutable(&mut self) -> Result<MutableRef<'_>> {
        let ty = self.ty;
        let fd = self.field;
        if fd.is_repeated() {
            let element_type = resolved_element_type(ty, fd)?;
            if !matches!(self.slot, Some(Value::List(_))) {
                *self.slot = Some(Value::List(Vec::new()));
            }
            return match &mut *self.slot {
                Some(Value::List(items)) => {
                    Ok(MutableRef::List(ListMut::new(fd, element_type, items)))
                }
                _ => Err(not_mutable(ty, fd)),
            };
        }
        if fd.kind().is_message() {
            if !matches!(self.slot, Some(Value::Message(_))) {
                let child = field_message_type(ty, fd)?;
                *self.slot = Some(Value::Message(Record::new(&child)));
            }
            return match &mut *self.slot {
                Some(Value::Message(record)) => Ok(MutableRef::Message(record)),
                _ => Err(not_mutable(ty, fd)),
            };
        }
        Err(not_mutable(ty, fd))
    }
}

impl<'a> MutableRef<'a> {
    pub fn into_message(self) -> Option<&'a mut Record> {
        match self {
            Self::Message(r) => Some(r),
            Self::List(_) => None,
        }
    }

    pub fn into_list(self) -> Option<ListMut<'a>> {
        match self {
            Self::List(l) => Some(l),
            Self::Message(_) => None,
        }
    }
}

impl Record {
    /// Empty record: nothing populated, no unknown bytes.
    pub fn new(ty: &MessageType) -> Self {
        Self {
            ty: ty.clone(),
            values: vec![None; ty.descriptor().fields().len()],
            unknown: Vec::new(),
        }
    }

    pub fn message_type(&self) -> &MessageType {
        &self.ty
    }

    pub fn descriptor(&self) -> &MessageDescriptor {
        self.ty.descriptor()
    }

    pub fn has<F: AsField>(&self, field: F) -> Result<bool> {
        let fd = field.resolve(self.ty.descriptor())?;
        Ok(self.populated_at(fd.index()).is_some())
    }

    /// Current value; unpopulated fields read as their zero value.
    pub fn get<F: AsField>(&self, field: F) -> Result<ValueRef<'_>> {
        let fd = field.resolve(self.ty.descriptor())?;
        match self.populated_at(fd.index()) {
            Some(value) => Ok(value.view()),
            None => default_ref(&self.ty, fd),
        }
    }

    /// Replace a field's value.
    ///
    /// The value must fit the field: matching scalar variant, a record of
    /// the referenced message type, or for repeated fields a `Value::List`
    /// whose every element fits. Setting a oneof member clears the others.
    /// Setting an implicit-presence scalar to its zero value clears it.
    pub fn set<F: AsField>(&mut self, field: F, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let (ty, values) = self.parts();
        let fd = field.resolve(ty.descriptor())?;
        let element_type = resolved_element_type(ty, fd)?;
        check_value(fd, element_type.as_ref(), &value)?;
        store_slot(values, ty.descriptor(), fd, value);
        Ok(())
    }

    pub fn clear<F: AsField>(&mut self, field: F) -> Result<()> {
        let (ty, values) = self.parts();
        let fd = field.resolve(ty.descriptor())?;
        values[fd.index()] = None;
        Ok(())
    }

    /// Mutable access to a message or repeated field, allocating it if
    /// absent. Scalars fail with [`Error::NotMutable`].
    pub fn mutable<F: AsField>(&mut self, field: F) -> Result<MutableRef<'_>> {
        let (ty, values) = self.parts();
        let fd = field.resolve(ty.descriptor())?;
        if fd.is_repeated() {
            return list_slot(ty, values, fd).map(MutableRef::List);
        }
        if fd.kind().is_message() {
            return message_slot(ty, values, fd).map(MutableRef::Message);
        }
        Err(not_mutable(ty, fd))
    }

    /// Singular message field, allocated if absent.
    pub fn mutable_message<F: AsField>(&mut self, field: F) -> Result<&mut Record> {
        let (ty, values) = self.parts();
        let fd = field.resolve(ty.descriptor())?;
        if fd.is_repeated() || !fd.kind().is_message() {
            return Err(not_mutable(ty, fd));
        }
        message_slot(ty, values, fd)
    }

    /// Repeated field, allocated (empty) if absent.
    pub fn mutable_list<F: AsField>(&mut self, field: F) -> Result<ListMut<'_>> {
        let (ty, values) = self.parts();
        let fd = field.resolve(ty.descriptor())?;
        if !fd.is_repeated() {
            return Err(not_mutable(ty, fd));
        }
        list_slot(ty, values, fd)
    }

    /// Fresh value assignable to `field` (not stored).
    pub fn new_field<F: AsField>(&self, field: F) -> Result<Value> {
        let fd = field.resolve(self.ty.descriptor())?;
        if fd.is_repeated() {
            return Ok(Value::List(Vec::new()));
        }
        match Value::default_for(fd.kind()) {
            Some(v) => Ok(v),
            None => Ok(Value::Message(Record::new(&field_message_type(&self.ty, fd)?))),
        }
    }

    /// Visit populated fields in declaration order until `f` returns `false`.
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(&FieldDescriptor, ValueRef<'_>) -> bool,
    {
        for fd in self.ty.descriptor().fields() {
            if let Some(value) = self.populated_at(fd.index()) {
                if !f(fd, value.view()) {
                    break;
                }
            }
        }
    }

    /// Like [`range`](Self::range), but each visited field can be edited,
    /// cleared or mutated in place through its [`FieldMut`]. Fields are
    /// selected before the callback runs, so a field cleared by the callback
    /// is still the one visited.
    pub fn range_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&FieldDescriptor, FieldMut<'_>) -> bool,
    {
        let (ty, values) = self.parts();
        for fd in ty.descriptor().fields() {
            let slot = &mut values[fd.index()];
            if !slot.as_ref().is_some_and(slot_populated) {
                continue;
            }
            let field = FieldMut {
                ty,
                field: fd,
                slot,
            };
            if !f(fd, field) {
                break;
            }
        }
    }

    /// Populated member of oneof `group`, if any.
    pub fn which_oneof(&self, group: &str) -> Result<Option<&FieldDescriptor>> {
        let desc = self.ty.descriptor();
        let oneof = desc
            .oneof_by_name(group)
            .ok_or_else(|| Error::unknown_field(desc.full_name(), group))?;
        Ok(oneof
            .field_indices()
            .iter()
            .find(|&&i| self.populated_at(i).is_some())
            .map(|&i| &desc.fields()[i]))
    }

    /// Raw bytes of fields the schema does not declare.
    pub fn unknown(&self) -> &[u8] {
        &self.unknown
    }

    /// Replace the unknown span. The bytes must parse as a field sequence.
    pub fn set_unknown(&mut self, bytes: impl Into<Vec<u8>>) -> Result<()> {
        let bytes = bytes.into();
        let mut reader = WireReader::new(&bytes);
        while !reader.is_eof() {
            let tag = reader.read_tag()?;
            reader.skip_field(tag)?;
        }
        self.unknown = bytes;
        Ok(())
    }

    /// Clear every field and the unknown span.
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|slot| *slot = None);
        self.unknown.clear();
    }

    /// Any field or unknown byte present.
    pub fn is_populated(&self) -> bool {
        !self.unknown.is_empty() || (0..self.values.len()).any(|i| self.populated_at(i).is_some())
    }

    // ------------------------------------------------------------------
    // Codec access
    // ------------------------------------------------------------------

    /// Stored value counting as present (empty lists are not).
    pub(crate) fn populated_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)?.as_ref().filter(|v| slot_populated(v))
    }

    pub(crate) fn store_field(&mut self, fd: &FieldDescriptor, value: Value) {
        store_slot(&mut self.values, self.ty.descriptor(), fd, value);
    }

    pub(crate) fn nested_mut(&mut self, fd: &FieldDescriptor) -> Result<&mut Record> {
        message_slot(&self.ty, &mut self.values, fd)
    }

    pub(crate) fn list_items_mut(&mut self, fd: &FieldDescriptor) -> Result<&mut Vec<Value>> {
        list_items(&mut self.values, fd)
    }

    pub(crate) fn append_unknown(&mut self, bytes: &[u8]) {
        self.unknown.extend_from_slice(bytes);
    }

    fn parts(&mut self) -> (&MessageType, &mut Vec<Option<Value>>) {
        (&self.ty, &mut self.values)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.ty.full_name() == other.ty.full_name()
            && self.values.len() == other.values.len()
            && self.unknown == other.unknown
            && (0..self.values.len()).all(|i| self.populated_at(i) == other.populated_at(i))
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.ty.full_name());
        for fd in self.ty.descriptor().fields() {
            if let Some(value) = self.populated_at(fd.index()) {
                s.field(fd.name(), value);
            }
        }
        if !self.unknown.is_empty() {
            s.field("<unknown>", &self.unknown);
        }
        s.finish()
    }
}

// ============================================================================
// Slot helpers (split borrows of descriptor and values)
// ============================================================================

fn store_slot(
    values: &mut [Option<Value>],
    desc: &MessageDescriptor,
    fd: &FieldDescriptor,
    value: Value,
) {
    clear_siblings(values, desc, fd);
    values[fd.index()] = presence_filtered(fd, value);
}

/// What a slot holds after storing `value`: implicit-presence zero values
/// are not kept.
fn presence_filtered(fd: &FieldDescriptor, value: Value) -> Option<Value> {
    if fd.has_explicit_presence() || !value.is_default() {
        Some(value)
    } else {
        None
    }
}

/// Empty lists are stored but not present.
fn slot_populated(value: &Value) -> bool {
    !matches!(value, Value::List(items) if items.is_empty())
}

fn clear_siblings(values: &mut [Option<Value>], desc: &MessageDescriptor, fd: &FieldDescriptor) {
    let Some(group) = fd.oneof_index().and_then(|o| desc.oneofs().get(o)) else {
        return;
    };
    for &i in group.field_indices() {
        if i != fd.index() {
            values[i] = None;
        }
    }
}

fn message_slot<'a>(
    ty: &MessageType,
    values: &'a mut [Option<Value>],
    fd: &FieldDescriptor,
) -> Result<&'a mut Record> {
    if !matches!(values[fd.index()], Some(Value::Message(_))) {
        let child = field_message_type(ty, fd)?;
        clear_siblings(values, ty.descriptor(), fd);
        values[fd.index()] = Some(Value::Message(Record::new(&child)));
    }
    match &mut values[fd.index()] {
        Some(Value::Message(record)) => Ok(record),
        _ => Err(not_mutable(ty, fd)),
    }
}

fn list_items<'a>(
    values: &'a mut [Option<Value>],
    fd: &FieldDescriptor,
) -> Result<&'a mut Vec<Value>> {
    if !matches!(values[fd.index()], Some(Value::List(_))) {
        values[fd.index()] = Some(Value::List(Vec::new()));
    }
    match &mut values[fd.index()] {
        Some(Value::List(items)) => Ok(items),
        other => Err(Error::TypeMismatch {
            field: fd.full_name().to_string(),
            expected: "list".to_string(),
            found: other.as_ref().map_or("none", Value::type_label).to_string(),
        }),
    }
}

fn list_slot<'a>(
    ty: &'a MessageType,
    values: &'a mut [Option<Value>],
    fd: &'a FieldDescriptor,
) -> Result<ListMut<'a>> {
    let element_type = resolved_element_type(ty, fd)?;
    Ok(ListMut::new(fd, element_type, list_items(values, fd)?))
}

/// Resolved message type of a message-kind field; `None` for scalars.
fn resolved_element_type(ty: &MessageType, fd: &FieldDescriptor) -> Result<Option<MessageType>> {
    if fd.kind().is_message() {
        field_message_type(ty, fd).map(Some)
    } else {
        Ok(None)
    }
}

fn not_mutable(ty: &MessageType, fd: &FieldDescriptor) -> Error {
    Error::NotMutable {
        message: ty.full_name().to_string(),
        field: fd.name().to_string(),
    }
}

fn check_value(
    fd: &FieldDescriptor,
    element_type: Option<&MessageType>,
    value: &Value,
) -> Result<()> {
    if !fd.is_repeated() {
        return check_element(fd, element_type, value);
    }
    match value {
        Value::List(items) => items
            .iter()
            .try_for_each(|item| check_element(fd, element_type, item)),
        other => Err(Error::TypeMismatch {
            field: fd.full_name().to_string(),
            expected: format!("list of {}", expected_label(fd)),
            found: found_label(fd, other),
        }),
    }
}

/// Type-check one (non-list) value against the field's element type.
///
/// Message values must belong to `element_type` itself: a record of a
/// same-named type from another pool is rejected.
pub(crate) fn check_element(
    fd: &FieldDescriptor,
    element_type: Option<&MessageType>,
    value: &Value,
) -> Result<()> {
    let fits = match value {
        Value::Message(record) => element_type == Some(record.message_type()),
        other => other.fits_kind(fd.kind()),
    };
    if fits {
        return Ok(());
    }
    Err(Error::TypeMismatch {
        field: fd.full_name().to_string(),
        expected: expected_label(fd),
        found: found_label(fd, value),
    })
}

fn expected_label(fd: &FieldDescriptor) -> String {
    match fd.type_name() {
        Some(name) => format!("{} {}", fd.kind(), name),
        None => fd.kind().to_string(),
    }
}

fn found_label(fd: &FieldDescriptor, value: &Value) -> String {
    match value {
        Value::Message(record) if fd.type_name() == Some(record.message_type().full_name()) => {
            format!("message {} from another pool", record.message_type().full_name())
        }
        Value::Message(record) => format!("message {}", record.message_type().full_name()),
        other => other.type_label().to_string(),
    }
}
