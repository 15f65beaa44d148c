// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolved message, field, oneof and enum descriptors.
//!
//! Descriptors are produced by [`PoolBuilder::build`](super::PoolBuilder::build)
//! and are immutable afterwards. Cross references between messages are pool
//! indices, so a message may refer to itself or to a later message.

use super::kind::{Cardinality, FieldKind};
use std::collections::HashMap;

/// Static metadata for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub(crate) number: u32,
    pub(crate) name: String,
    pub(crate) full_name: String,
    pub(crate) kind: FieldKind,
    pub(crate) cardinality: Cardinality,
    pub(crate) packed: bool,
    pub(crate) oneof: Option<usize>,
    pub(crate) proto3_optional: bool,
    pub(crate) type_name: Option<String>,
    /// Pool index of the message or enum named by `type_name`.
    pub(crate) type_index: Option<usize>,
    /// Position in the owning message's declaration order.
    pub(crate) index: usize,
}

impl FieldDescriptor {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<message full name>.<field name>`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    /// Repeated numeric field encoded as one length-delimited run.
    pub fn is_packed(&self) -> bool {
        self.packed
    }

    /// Index into [`MessageDescriptor::oneofs`] when the field is a oneof member.
    pub fn oneof_index(&self) -> Option<usize> {
        self.oneof
    }

    /// Declared with `optional` (explicit presence outside a oneof).
    pub fn is_proto3_optional(&self) -> bool {
        self.proto3_optional
    }

    /// Presence is tracked explicitly instead of inferred from the value.
    ///
    /// True for messages, oneof members and `optional` scalars.
    pub fn has_explicit_presence(&self) -> bool {
        !self.is_repeated()
            && (self.kind.is_message() || self.oneof.is_some() || self.proto3_optional)
    }

    /// Full name of the referenced message or enum type.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub(crate) fn type_index(&self) -> Option<usize> {
        self.type_index
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// A oneof group: at most one member is populated at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct OneofDescriptor {
    pub(crate) name: String,
    pub(crate) full_name: String,
    pub(crate) fields: Vec<usize>,
}

impl OneofDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Member field indices in declaration order.
    pub fn field_indices(&self) -> &[usize] {
        &self.fields
    }
}

/// Static metadata for one message type.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
    pub(crate) full_name: String,
    pub(crate) fields: Vec<FieldDescriptor>,
    pub(crate) oneofs: Vec<OneofDescriptor>,
    pub(crate) by_name: HashMap<String, usize>,
    pub(crate) by_number: HashMap<u32, usize>,
    /// Field indices sorted by descending number (backward encoding order).
    pub(crate) encode_order: Vec<usize>,
}

impl MessageDescriptor {
    pub(crate) fn new(
        full_name: String,
        fields: Vec<FieldDescriptor>,
        oneofs: Vec<OneofDescriptor>,
    ) -> Self {
        let by_name = fields
            .iter()
            .map(|f| (f.name.clone(), f.index))
            .collect();
        let by_number = fields.iter().map(|f| (f.number, f.index)).collect();
        let mut encode_order: Vec<usize> = (0..fields.len()).collect();
        encode_order.sort_by(|a, b| fields[*b].number.cmp(&fields[*a].number));
        Self {
            full_name,
            fields,
            oneofs,
            by_name,
            by_number,
            encode_order,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Last component of the full name.
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or(self.full_name.as_str(), |(_, n)| n)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.by_number.get(&number).map(|&i| &self.fields[i])
    }

    pub fn oneofs(&self) -> &[OneofDescriptor] {
        &self.oneofs
    }

    pub fn oneof_by_name(&self, name: &str) -> Option<&OneofDescriptor> {
        self.oneofs.iter().find(|o| o.name == name)
    }

    pub(crate) fn encode_order(&self) -> &[usize] {
        &self.encode_order
    }
}

/// Enum type: names its values, never restricts them.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    pub(crate) full_name: String,
    pub(crate) values: Vec<(String, i32)>,
}

impl EnumDescriptor {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            values: Vec::new(),
        }
    }

    /// Add a named value (builder style).
    pub fn value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.values.push((name.into(), number));
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn values(&self) -> &[(String, i32)] {
        &self.values
    }

    /// First declared name for `number`.
    pub fn value_name(&self, number: i32) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, n)| *n == number)
            .map(|(name, _)| name.as_str())
    }

    pub fn value_by_name(&self, name: &str) -> Option<i32> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(index: usize, number: u32, name: &str) -> FieldDescriptor {
        FieldDescriptor {
            number,
            name: name.into(),
            full_name: format!("pkg.M.{}", name),
            kind: FieldKind::String,
            cardinality: Cardinality::Singular,
            packed: false,
            oneof: None,
            proto3_optional: false,
            type_name: None,
            type_index: None,
            index,
        }
    }

    #[test]
    fn test_lookup_and_encode_order() {
        let desc = MessageDescriptor::new(
            "pkg.M".into(),
            vec![field(0, 3, "c"), field(1, 1, "a"), field(2, 7, "g")],
            Vec::new(),
        );
        assert_eq!(desc.name(), "M");
        assert_eq!(desc.field_by_name("a").map(|f| f.number()), Some(1));
        assert_eq!(desc.field_by_number(7).map(|f| f.name()), Some("g"));
        assert!(desc.field_by_number(2).is_none());
        assert_eq!(desc.encode_order(), &[2, 0, 1]);
    }

    #[test]
    fn test_enum_names_are_informational() {
        let e = EnumDescriptor::new("pkg.Color").value("RED", 0).value("GREEN", 1);
        assert_eq!(e.value_name(1), Some("GREEN"));
        assert_eq!(e.value_name(9), None);
        assert_eq!(e.value_by_name("RED"), Some(0));
    }
}
