// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Backward encoder.
//!
//! Mirrors [`size`](super::size) exactly: anything `record_size` counts is
//! written here, and nothing else. The writer is filled tail first, so the
//! unknown span goes down before any field and fields go in descending
//! number order.

use super::scalar::WireScalar;
use crate::reflect::{Record, Value};
use crate::schema::FieldDescriptor;
use crate::wire::{WireType, WireWriter};

pub(crate) fn write_record(w: &mut WireWriter, record: &Record) {
    w.prepend_bytes(record.unknown());
    let desc = record.descriptor();
    for &index in desc.encode_order() {
        if let Some(value) = record.populated_at(index) {
            write_field(w, &desc.fields()[index], value);
        }
    }
}

fn write_field(w: &mut WireWriter, fd: &FieldDescriptor, value: &Value) {
    match value {
        Value::List(items) if fd.is_packed() => {
            let mark = w.written();
            for item in items.iter().rev() {
                if let Some(s) = WireScalar::of(fd.kind(), item) {
                    s.prepend(w);
                }
            }
            let len = w.written() - mark;
            w.prepend_varint(len as u64);
            w.prepend_tag(fd.number(), WireType::LengthDelimited);
        }
        Value::List(items) => {
            for item in items.iter().rev() {
                write_element(w, fd, item);
            }
        }
        other => write_element(w, fd, other),
    }
}

fn write_element(w: &mut WireWriter, fd: &FieldDescriptor, value: &Value) {
    match value {
        Value::Message(nested) => {
            let mark = w.written();
            write_record(w, nested);
            let len = w.written() - mark;
            w.prepend_varint(len as u64);
            w.prepend_tag(fd.number(), WireType::LengthDelimited);
        }
        other => {
            if let Some(s) = WireScalar::of(fd.kind(), other) {
                s.prepend(w);
                w.prepend_tag(fd.number(), fd.kind().wire_type());
            }
        }
    }
}
