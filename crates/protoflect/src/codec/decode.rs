// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decode state machine.
//!
//! Scanning reads a tag, dispatching routes it by field number, and the loop
//! returns to scanning until the buffer is exhausted exactly on a field
//! boundary. Any error ends the decode; the record being filled is then in
//! an unspecified state and must be discarded.

use crate::config::UnmarshalOptions;
use crate::error::{Error, Result};
use crate::reflect::{field_message_type, Record, Value};
use crate::schema::{FieldDescriptor, FieldKind};
use crate::wire::{zigzag_decode32, zigzag_decode64, Tag, WireReader, WireType};

/// Merge the fields encoded in `bytes` into `record`.
///
/// `depth` is the nesting level of `record` (0 for the outermost message).
pub(crate) fn merge_record(
    bytes: &[u8],
    record: &mut Record,
    opts: &UnmarshalOptions,
    depth: usize,
) -> Result<()> {
    let ty = record.message_type().clone();
    let desc = ty.descriptor();
    let mut reader = WireReader::new(bytes);

    while !reader.is_eof() {
        let start = reader.offset();
        let tag = reader.read_tag()?;
        match desc.field_by_number(tag.field_number) {
            Some(fd) => {
                log::trace!(
                    "[decode] {} #{} {}",
                    fd.full_name(),
                    tag.field_number,
                    tag.wire_type
                );
                decode_field(&mut reader, tag, fd, record, opts, depth)?;
            }
            None => {
                reader.skip_field_within(tag, depth, opts.limit())?;
                if opts.discards_unknown() {
                    continue;
                }
                if let Some(raw) = reader.slice_from(start) {
                    log::trace!(
                        "[decode] {}: keeping unknown field #{} ({} bytes)",
                        desc.full_name(),
                        tag.field_number,
                        raw.len()
                    );
                    record.append_unknown(raw);
                }
            }
        }
    }
    Ok(())
}

fn decode_field(
    reader: &mut WireReader<'_>,
    tag: Tag,
    fd: &FieldDescriptor,
    record: &mut Record,
    opts: &UnmarshalOptions,
    depth: usize,
) -> Result<()> {
    let kind = fd.kind();

    // Repeated numerics accept packed runs whatever their declared encoding.
    if fd.is_repeated() && kind.is_packable() && tag.wire_type == WireType::LengthDelimited {
        let mut packed = WireReader::new(reader.read_length_delimited()?);
        let items = record.list_items_mut(fd)?;
        while !packed.is_eof() {
            items.push(read_scalar(&mut packed, fd)?);
        }
        return Ok(());
    }

    if tag.wire_type != kind.wire_type() {
        // A truncated payload is reported as truncation.
        reader.skip_field_within(tag, depth, opts.limit())?;
        return Err(Error::WireTypeMismatch {
            field: fd.full_name().to_string(),
            expected: kind.wire_type(),
            found: tag.wire_type,
        });
    }

    if kind.is_message() {
        let payload = reader.read_length_delimited()?;
        if depth >= opts.limit() {
            return Err(Error::RecursionLimitExceeded {
                limit: opts.limit(),
            });
        }
        if fd.is_repeated() {
            let mut child = Record::new(&field_message_type(record.message_type(), fd)?);
            merge_record(payload, &mut child, opts, depth + 1)?;
            record.list_items_mut(fd)?.push(Value::Message(child));
        } else {
            // Later occurrences merge into the earlier message.
            merge_record(payload, record.nested_mut(fd)?, opts, depth + 1)?;
        }
        return Ok(());
    }

    let value = read_scalar(reader, fd)?;
    if fd.is_repeated() {
        record.list_items_mut(fd)?.push(value);
    } else {
        record.store_field(fd, value);
    }
    Ok(())
}

fn read_scalar(reader: &mut WireReader<'_>, fd: &FieldDescriptor) -> Result<Value> {
    let value = match fd.kind() {
        FieldKind::Bool => Value::Bool(reader.read_varint()? != 0),
        FieldKind::Int32 => Value::I32(reader.read_varint()? as i32),
        FieldKind::Int64 => Value::I64(reader.read_varint()? as i64),
        FieldKind::Uint32 => Value::U32(reader.read_varint()? as u32),
        FieldKind::Uint64 => Value::U64(reader.read_varint()?),
        FieldKind::Sint32 => Value::I32(zigzag_decode32(reader.read_varint()? as u32)),
        FieldKind::Sint64 => Value::I64(zigzag_decode64(reader.read_varint()?)),
        FieldKind::Enum => Value::Enum(reader.read_varint()? as i32),
        FieldKind::Fixed32 => Value::U32(reader.read_fixed32()?),
        FieldKind::Sfixed32 => Value::I32(reader.read_fixed32()? as i32),
        FieldKind::Float => Value::F32(f32::from_bits(reader.read_fixed32()?)),
        FieldKind::Fixed64 => Value::U64(reader.read_fixed64()?),
        FieldKind::Sfixed64 => Value::I64(reader.read_fixed64()? as i64),
        FieldKind::Double => Value::F64(f64::from_bits(reader.read_fixed64()?)),
        FieldKind::String => {
            let bytes = reader.read_length_delimited()?;
            let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
                field: fd.full_name().to_string(),
            })?;
            Value::String(s.to_string())
        }
        FieldKind::Bytes => Value::Bytes(reader.read_length_delimited()?.to_vec()),
        FieldKind::Message => {
            return Err(Error::TypeMismatch {
                field: fd.full_name().to_string(),
                expected: "scalar".to_string(),
                found: "message".to_string(),
            })
        }
    };
    Ok(value)
}
