// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Repeated-field views.

use super::record::{check_element, Record};
use super::value::{Value, ValueRef};
use crate::error::{Error, Result};
use crate::schema::{FieldDescriptor, MessageType};

/// Read-only view of a repeated field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListView<'a> {
    items: &'a [Value],
}

impl<'a> ListView<'a> {
    pub(crate) fn new(items: &'a [Value]) -> Self {
        Self { items }
    }

    pub(crate) fn empty() -> Self {
        Self { items: &[] }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<ValueRef<'a>> {
        self.items
            .get(index)
            .map(Value::view)
            .ok_or(Error::IndexOutOfBounds {
                index,
                length: self.items.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = ValueRef<'a>> + 'a {
        self.items.iter().map(Value::view)
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.items.to_vec()
    }
}

/// Mutable view of a repeated field, borrowed from its record.
///
/// Every stored element is type-checked against the field.
#[derive(Debug)]
pub struct ListMut<'a> {
    field: &'a FieldDescriptor,
    element_type: Option<MessageType>,
    items: &'a mut Vec<Value>,
}

impl<'a> ListMut<'a> {
    pub(crate) fn new(
        field: &'a FieldDescriptor,
        element_type: Option<MessageType>,
        items: &'a mut Vec<Value>,
    ) -> Self {
        Self {
            field,
            element_type,
            items,
        }
    }

    pub fn field(&self) -> &FieldDescriptor {
        self.field
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<ValueRef<'_>> {
        self.view().get(index)
    }

    pub fn view(&self) -> ListView<'_> {
        ListView::new(self.items)
    }

    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let length = self.items.len();
        if index >= length {
            return Err(Error::IndexOutOfBounds { index, length });
        }
        let value = value.into();
        check_element(self.field, self.element_type.as_ref(), &value)?;
        self.items[index] = value;
        Ok(())
    }

    pub fn append(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        check_element(self.field, self.element_type.as_ref(), &value)?;
        self.items.push(value);
        Ok(())
    }

    /// Append an empty message element and return it for filling.
    ///
    /// Fails with [`Error::NotMutable`] on scalar lists.
    pub fn append_mutable(&mut self) -> Result<&mut Record> {
        let field = self.field;
        let Some(ty) = self.element_type.as_ref() else {
            return Err(not_mutable(field));
        };
        self.items.push(Value::Message(Record::new(ty)));
        match self.items.last_mut() {
            Some(Value::Message(record)) => Ok(record),
            _ => Err(not_mutable(field)),
        }
    }

    /// Keep the first `len` elements and drop the rest. No-op when
    /// `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// A fresh element value, not yet in the list.
    pub fn new_element(&self) -> Value {
        match &self.element_type {
            Some(ty) => Value::Message(Record::new(ty)),
            None => Value::default_for(self.field.kind()).unwrap_or(Value::List(Vec::new())),
        }
    }
}

fn not_mutable(field: &FieldDescriptor) -> Error {
    let message = field
        .full_name()
        .rsplit_once('.')
        .map_or("", |(message, _)| message);
    Error::NotMutable {
        message: message.to_string(),
        field: field.name().to_string(),
    }
}
