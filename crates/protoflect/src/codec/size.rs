// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Exact encoded size of a record.

use super::scalar::WireScalar;
use crate::reflect::{Record, Value};
use crate::schema::FieldDescriptor;
use crate::wire::{tag_length, varint_length};

/// Bytes `marshal(record)` produces.
pub(crate) fn record_size(record: &Record) -> usize {
    let mut total = record.unknown().len();
    for fd in record.descriptor().fields() {
        if let Some(value) = record.populated_at(fd.index()) {
            total += field_size(fd, value);
        }
    }
    total
}

fn field_size(fd: &FieldDescriptor, value: &Value) -> usize {
    let tag = tag_length(fd.number());
    match value {
        Value::List(items) if fd.is_packed() => {
            let payload: usize = items
                .iter()
                .filter_map(|item| WireScalar::of(fd.kind(), item))
                .map(|s| s.len())
                .sum();
            tag + varint_length(payload as u64) + payload
        }
        Value::List(items) => items.iter().map(|item| element_size(fd, tag, item)).sum(),
        other => element_size(fd, tag, other),
    }
}

fn element_size(fd: &FieldDescriptor, tag: usize, value: &Value) -> usize {
    match value {
        Value::Message(nested) => {
            let n = record_size(nested);
            tag + varint_length(n as u64) + n
        }
        other => WireScalar::of(fd.kind(), other).map_or(0, |s| tag + s.len()),
    }
}
