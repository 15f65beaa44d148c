// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encode/decode records to and from protobuf wire bytes.
//!
//! Encoding is size-first: [`size`] computes the exact length, [`marshal`]
//! allocates it once and fills it backward with a
//! [`WireWriter`](crate::wire::WireWriter). Output is canonical and
//! deterministic: ascending field numbers, packed repeated numerics, unknown
//! fields last.
//!
//! # Example
//!
//! ```rust
//! use protoflect::{codec, schemas::authz, Record};
//!
//! let ty = authz::query_grants_request();
//! let mut req = Record::new(&ty);
//! req.set("granter", "addr1").unwrap();
//! req.set("grantee", "addr2").unwrap();
//!
//! let bytes = codec::marshal(&req);
//! assert_eq!(&bytes[..2], &[0x0A, 0x05]);
//! assert_eq!(codec::unmarshal(&bytes, &ty).unwrap(), req);
//! ```

mod decode;
mod encode;
mod scalar;
mod size;

use crate::config::UnmarshalOptions;
use crate::error::Result;
use crate::reflect::Record;
use crate::schema::MessageType;
use crate::wire::WireWriter;

/// Exact number of bytes [`marshal`] writes for `record`.
pub fn size(record: &Record) -> usize {
    size::record_size(record)
}

/// Encode `record`.
///
/// # Panics
///
/// If sizing and encoding disagree. That is an internal invariant violation.
pub fn marshal(record: &Record) -> Vec<u8> {
    let mut writer = WireWriter::with_exact_size(size(record));
    encode::write_record(&mut writer, record);
    writer.finish()
}

/// Encode `record` onto the end of `out`.
pub fn marshal_append(record: &Record, out: &mut Vec<u8>) {
    out.extend_from_slice(&marshal(record));
}

/// Decode a record of type `ty` with default options.
pub fn unmarshal(bytes: &[u8], ty: &MessageType) -> Result<Record> {
    unmarshal_with(bytes, ty, &UnmarshalOptions::default())
}

/// Decode a record of type `ty`. No partial record is ever returned.
pub fn unmarshal_with(bytes: &[u8], ty: &MessageType, opts: &UnmarshalOptions) -> Result<Record> {
    let mut record = Record::new(ty);
    merge(bytes, &mut record, opts)?;
    Ok(record)
}

/// Decode `bytes` on top of the fields already in `record`.
///
/// Scalars are overwritten, singular messages merged, repeated fields
/// appended. On error `record` is left partially merged and should be
/// discarded.
pub fn merge(bytes: &[u8], record: &mut Record, opts: &UnmarshalOptions) -> Result<()> {
    decode::merge_record(bytes, record, opts, 0).map_err(|e| {
        log::debug!(
            "[codec] decode of {} failed ({} bytes): {}",
            record.message_type().full_name(),
            bytes.len(),
            e
        );
        e
    })
}
