// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor pool: a resolved, immutable set of message and enum types.

use super::builder::{FieldSpec, MessageDescriptorBuilder};
use super::descriptor::{EnumDescriptor, FieldDescriptor, MessageDescriptor, OneofDescriptor};
use super::kind::{Cardinality, FieldKind};
use crate::config::is_valid_field_number;
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Resolved type tables shared behind `Arc`.
#[derive(Debug, Default)]
pub struct DescriptorPool {
    messages: Vec<MessageDescriptor>,
    enums: Vec<EnumDescriptor>,
    message_names: HashMap<String, usize>,
    enum_names: HashMap<String, usize>,
}

impl DescriptorPool {
    pub fn messages(&self) -> &[MessageDescriptor] {
        &self.messages
    }

    pub fn enums(&self) -> &[EnumDescriptor] {
        &self.enums
    }

    pub fn message_descriptor(&self, full_name: &str) -> Option<&MessageDescriptor> {
        self.message_names
            .get(strip_dot(full_name))
            .map(|&i| &self.messages[i])
    }

    pub fn find_enum(&self, full_name: &str) -> Option<&EnumDescriptor> {
        self.enum_names
            .get(strip_dot(full_name))
            .map(|&i| &self.enums[i])
    }

    /// Handle to a message type of this pool.
    pub fn find_message(self: &Arc<Self>, full_name: &str) -> Option<MessageType> {
        let index = *self.message_names.get(strip_dot(full_name))?;
        Some(MessageType {
            pool: Arc::clone(self),
            index,
        })
    }
}

/// Message type handle: pool plus index. Cheap to clone.
#[derive(Clone)]
pub struct MessageType {
    pool: Arc<DescriptorPool>,
    index: usize,
}

impl MessageType {
    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.pool.messages[self.index]
    }

    pub fn full_name(&self) -> &str {
        &self.descriptor().full_name
    }

    pub fn pool(&self) -> &Arc<DescriptorPool> {
        &self.pool
    }

    /// Message type referenced by a message-kind field of this pool.
    pub fn field_type(&self, field: &FieldDescriptor) -> Option<MessageType> {
        if !field.kind().is_message() {
            return None;
        }
        field.type_index().map(|index| MessageType {
            pool: Arc::clone(&self.pool),
            index,
        })
    }

    /// Enum type referenced by an enum-kind field of this pool.
    pub fn field_enum(&self, field: &FieldDescriptor) -> Option<&EnumDescriptor> {
        if !field.kind().is_enum() {
            return None;
        }
        field.type_index().and_then(|i| self.pool.enums.get(i))
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && Arc::ptr_eq(&self.pool, &other.pool)
    }
}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageType({})", self.full_name())
    }
}

/// Collects message and enum declarations, then validates and resolves them.
#[derive(Debug, Default, Clone)]
pub struct PoolBuilder {
    messages: Vec<MessageDescriptorBuilder>,
    enums: Vec<EnumDescriptor>,
}

impl PoolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: MessageDescriptorBuilder) -> Self {
        self.add_message(message);
        self
    }

    pub fn enumeration(mut self, descriptor: EnumDescriptor) -> Self {
        self.add_enum(descriptor);
        self
    }

    pub fn add_message(&mut self, message: MessageDescriptorBuilder) {
        self.messages.push(message);
    }

    pub fn add_enum(&mut self, descriptor: EnumDescriptor) {
        self.enums.push(descriptor);
    }

    /// Validate every declaration and resolve type references.
    ///
    /// Fails with [`Error::InvalidSchema`] on duplicate type names, duplicate
    /// or out-of-range field numbers, duplicate field names, unresolved or
    /// wrong-kind type references, and `packed` on non-packable fields.
    pub fn build(self) -> Result<Arc<DescriptorPool>> {
        let mut message_names = HashMap::new();
        let mut enum_names = HashMap::new();

        for (i, m) in self.messages.iter().enumerate() {
            let name = strip_dot(&m.full_name);
            check_type_name(name)?;
            if message_names.insert(name.to_string(), i).is_some() {
                return Err(invalid(format!("duplicate type {}", name)));
            }
        }
        for (i, e) in self.enums.iter().enumerate() {
            let name = strip_dot(&e.full_name);
            check_type_name(name)?;
            if message_names.contains_key(name) || enum_names.insert(name.to_string(), i).is_some()
            {
                return Err(invalid(format!("duplicate type {}", name)));
            }
            check_enum(name, e)?;
        }

        let mut messages = Vec::with_capacity(self.messages.len());
        for m in &self.messages {
            messages.push(resolve_message(m, &message_names, &enum_names)?);
        }
        let enums = self
            .enums
            .into_iter()
            .map(|mut e| {
                e.full_name = strip_dot(&e.full_name).to_string();
                e
            })
            .collect::<Vec<_>>();

        log::debug!(
            "[schema] pool built: {} messages, {} enums",
            messages.len(),
            enums.len()
        );
        Ok(Arc::new(DescriptorPool {
            messages,
            enums,
            message_names,
            enum_names,
        }))
    }
}

fn invalid(msg: String) -> Error {
    Error::InvalidSchema(msg)
}

fn strip_dot(name: &str) -> &str {
    name.strip_prefix('.').unwrap_or(name)
}

fn check_type_name(name: &str) -> Result<()> {
    if name.is_empty() || name.split('.').any(str::is_empty) {
        return Err(invalid(format!("malformed type name {:?}", name)));
    }
    Ok(())
}

fn check_enum(name: &str, e: &EnumDescriptor) -> Result<()> {
    match e.values.first() {
        None => Err(invalid(format!("enum {} has no values", name))),
        Some((_, first)) if *first != 0 => {
            Err(invalid(format!("enum {}: first value must be 0", name)))
        }
        Some(_) => Ok(()),
    }
}

fn resolve_message(
    m: &MessageDescriptorBuilder,
    message_names: &HashMap<String, usize>,
    enum_names: &HashMap<String, usize>,
) -> Result<MessageDescriptor> {
    let full_name = strip_dot(&m.full_name).to_string();
    let mut numbers = HashSet::new();
    let mut names = HashSet::new();
    let mut oneofs: Vec<OneofDescriptor> = Vec::new();
    let mut fields = Vec::with_capacity(m.fields.len());

    for (index, spec) in m.fields.iter().enumerate() {
        let field_full = format!("{}.{}", full_name, spec.name);
        if spec.name.is_empty() {
            return Err(invalid(format!("{}: field with empty name", full_name)));
        }
        if !is_valid_field_number(spec.number) {
            return Err(invalid(format!(
                "{}: field number {} out of range or reserved",
                field_full, spec.number
            )));
        }
        if !numbers.insert(spec.number) {
            return Err(invalid(format!(
                "{}: duplicate field number {}",
                full_name, spec.number
            )));
        }
        if !names.insert(spec.name.as_str()) {
            return Err(invalid(format!("{}: duplicate field name", field_full)));
        }
        check_modifiers(&field_full, spec)?;

        let (type_name, type_index) =
            resolve_type_ref(&field_full, spec, message_names, enum_names)?;
        let oneof = match &spec.oneof {
            Some(group) => Some(oneof_slot(&mut oneofs, &full_name, group, index)),
            None => None,
        };
        let repeated = spec.cardinality == Cardinality::Repeated;
        let packed = repeated && spec.kind.is_packable() && spec.packed.unwrap_or(true);

        fields.push(FieldDescriptor {
            number: spec.number,
            name: spec.name.clone(),
            full_name: field_full,
            kind: spec.kind,
            cardinality: spec.cardinality,
            packed,
            oneof,
            proto3_optional: spec.optional,
            type_name,
            type_index,
            index,
        });
    }

    if let Some(o) = oneofs.iter().find(|o| names.contains(o.name.as_str())) {
        return Err(invalid(format!(
            "{}: oneof name collides with a field",
            o.full_name
        )));
    }
    Ok(MessageDescriptor::new(full_name, fields, oneofs))
}

fn check_modifiers(field_full: &str, spec: &FieldSpec) -> Result<()> {
    let repeated = spec.cardinality == Cardinality::Repeated;
    if repeated && spec.oneof.is_some() {
        return Err(invalid(format!("{}: repeated field in oneof", field_full)));
    }
    if spec.optional && (repeated || spec.oneof.is_some()) {
        return Err(invalid(format!(
            "{}: optional only applies to singular fields outside a oneof",
            field_full
        )));
    }
    if spec.packed == Some(true) && !(repeated && spec.kind.is_packable()) {
        return Err(invalid(format!(
            "{}: packed requires a repeated numeric field",
            field_full
        )));
    }
    Ok(())
}

fn resolve_type_ref(
    field_full: &str,
    spec: &FieldSpec,
    message_names: &HashMap<String, usize>,
    enum_names: &HashMap<String, usize>,
) -> Result<(Option<String>, Option<usize>)> {
    let table = match spec.kind {
        FieldKind::Message => message_names,
        FieldKind::Enum => enum_names,
        _ => {
            if spec.type_name.is_some() {
                return Err(invalid(format!(
                    "{}: {} field cannot reference a type",
                    field_full, spec.kind
                )));
            }
            return Ok((None, None));
        }
    };
    let Some(raw) = spec.type_name.as_deref() else {
        return Err(invalid(format!(
            "{}: {} field needs a type name",
            field_full, spec.kind
        )));
    };
    let name = strip_dot(raw);
    match table.get(name) {
        Some(&i) => Ok((Some(name.to_string()), Some(i))),
        None => Err(invalid(format!(
            "{}: unresolved {} type {}",
            field_full, spec.kind, name
        ))),
    }
}

fn oneof_slot(
    oneofs: &mut Vec<OneofDescriptor>,
    message: &str,
    group: &str,
    field_index: usize,
) -> usize {
    if let Some(pos) = oneofs.iter().position(|o| o.name == group) {
        oneofs[pos].fields.push(field_index);
        return pos;
    }
    oneofs.push(OneofDescriptor {
        name: group.to_string(),
        full_name: format!("{}.{}", message, group),
        fields: vec![field_index],
    });
    oneofs.len() - 1
}
