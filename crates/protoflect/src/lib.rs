// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # protoflect - reflective protobuf wire codec
//!
//! Encodes and decodes schema-typed records to and from the protobuf binary
//! wire format (proto3 semantics), and exposes every record's fields through
//! a uniform descriptor-driven API. Nothing about a message's shape is known
//! at compile time: schemas are runtime descriptor tables.
//!
//! ## Quick Start
//!
//! ```rust
//! use protoflect::{codec, schemas::authz, Record, Result};
//!
//! fn main() -> Result<()> {
//!     let ty = authz::query_grants_request();
//!
//!     let mut req = Record::new(&ty);
//!     req.set("granter", "addr1")?;
//!     req.set("grantee", "addr2")?;
//!
//!     let bytes = codec::marshal(&req);
//!     assert_eq!(bytes.len(), codec::size(&req));
//!
//!     let decoded = codec::unmarshal(&bytes, &ty)?;
//!     assert_eq!(decoded.get("grantee")?.as_str(), Some("addr2"));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                         Codec Driver                                |
//! |   size -> exact allocation -> backward marshal | decode state loop  |
//! +---------------------------------------------------------------------+
//! |                       Reflective Records                            |
//! |   Record (has/get/set/clear/mutable/range) | ListView | ListMut     |
//! +---------------------------------------------------------------------+
//! |                            Schema                                   |
//! |   MessageDescriptor | DescriptorPool | registry | YAML loader       |
//! +---------------------------------------------------------------------+
//! |                          Wire Layer                                 |
//! |   varint/zigzag | tags | WireReader | WireWriter (backward)         |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Record`] | One message instance with reflective field access |
//! | [`MessageType`] | Handle to a message descriptor inside a pool |
//! | [`PoolBuilder`] | Declares, validates and resolves message types |
//! | [`Value`] / [`ValueRef`] | Owned / borrowed field values |
//! | [`UnmarshalOptions`] | Decode knobs (unknown fields, nesting limit) |
//!
//! ## Modules Overview
//!
//! - [`codec`] - marshal / unmarshal / merge
//! - [`reflect`] - records and field values
//! - [`schema`] - descriptors, pools, registry, loader
//! - [`wire`] - low-level wire primitives
//! - [`schemas`] - built-in message types

pub mod codec;
/// Wire-format limits and decode options.
pub mod config;
mod error;
pub mod reflect;
pub mod schema;
pub mod schemas;
pub mod wire;

pub use config::UnmarshalOptions;
pub use error::{Error, Result};
pub use reflect::{
    AsField, FieldMut, ListMut, ListView, MessageView, MutableRef, Record, Value, ValueRef,
};
pub use schema::{
    Cardinality, DescriptorPool, FieldDescriptor, FieldKind, MessageDescriptor,
    MessageDescriptorBuilder, MessageType, PoolBuilder,
};
