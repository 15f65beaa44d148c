// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for message descriptors.
//!
//! Builders only collect declarations. Validation and name resolution happen
//! in [`PoolBuilder::build`](super::PoolBuilder::build), once every type of
//! the pool is known.

use super::kind::{Cardinality, FieldKind};

/// Declaration of one field, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub number: u32,
    pub kind: FieldKind,
    pub cardinality: Cardinality,
    /// `None` means the proto3 default (packed when packable).
    pub packed: Option<bool>,
    pub oneof: Option<String>,
    pub optional: bool,
    /// Referenced message or enum; a leading `.` is accepted and ignored.
    pub type_name: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            cardinality: Cardinality::Singular,
            packed: None,
            oneof: None,
            optional: false,
            type_name: None,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    pub fn packed(mut self, packed: bool) -> Self {
        self.packed = Some(packed);
        self
    }

    pub fn in_oneof(mut self, oneof: impl Into<String>) -> Self {
        self.oneof = Some(oneof.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// Builder for one message type.
///
/// ```
/// use protoflect::schema::{FieldKind, MessageDescriptorBuilder, PoolBuilder};
///
/// let pool = PoolBuilder::new()
///     .message(
///         MessageDescriptorBuilder::new("demo.Node")
///             .field("label", 1, FieldKind::String)
///             .repeated_message("children", 2, "demo.Node"),
///     )
///     .build()
///     .expect("valid schema");
/// assert!(pool.find_message("demo.Node").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct MessageDescriptorBuilder {
    pub(crate) full_name: String,
    pub(crate) fields: Vec<FieldSpec>,
}

impl MessageDescriptorBuilder {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Vec::new(),
        }
    }

    /// Add any field declaration.
    pub fn spec(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Singular scalar with implicit presence.
    pub fn field(self, name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        self.spec(FieldSpec::new(name, number, kind))
    }

    /// Singular scalar with explicit presence.
    pub fn optional(self, name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        self.spec(FieldSpec::new(name, number, kind).optional())
    }

    /// Repeated field; numeric kinds are packed.
    pub fn repeated(self, name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        self.spec(FieldSpec::new(name, number, kind).repeated())
    }

    /// Repeated numeric field encoded one tag per element.
    pub fn unpacked(self, name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        self.spec(FieldSpec::new(name, number, kind).repeated().packed(false))
    }

    pub fn message(
        self,
        name: impl Into<String>,
        number: u32,
        type_name: impl Into<String>,
    ) -> Self {
        self.spec(FieldSpec::new(name, number, FieldKind::Message).type_name(type_name))
    }

    pub fn repeated_message(
        self,
        name: impl Into<String>,
        number: u32,
        type_name: impl Into<String>,
    ) -> Self {
        self.spec(
            FieldSpec::new(name, number, FieldKind::Message)
                .repeated()
                .type_name(type_name),
        )
    }

    pub fn enumeration(
        self,
        name: impl Into<String>,
        number: u32,
        type_name: impl Into<String>,
    ) -> Self {
        self.spec(FieldSpec::new(name, number, FieldKind::Enum).type_name(type_name))
    }

    /// Scalar member of oneof `group`.
    pub fn oneof(
        self,
        group: impl Into<String>,
        name: impl Into<String>,
        number: u32,
        kind: FieldKind,
    ) -> Self {
        self.spec(FieldSpec::new(name, number, kind).in_oneof(group))
    }

    /// Message member of oneof `group`.
    pub fn oneof_message(
        self,
        group: impl Into<String>,
        name: impl Into<String>,
        number: u32,
        type_name: impl Into<String>,
    ) -> Self {
        self.spec(
            FieldSpec::new(name, number, FieldKind::Message)
                .in_oneof(group)
                .type_name(type_name),
        )
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}
