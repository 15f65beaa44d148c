// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime schema: field descriptor tables for message types.
//!
//! # Features
//!
//! - **FieldKind / Cardinality**: declared type of every field
//! - **MessageDescriptorBuilder**: fluent declaration of a message type
//! - **PoolBuilder / DescriptorPool**: validation, name resolution, shared tables
//! - **MessageType**: cheap `(pool, index)` handle used by records
//! - **Registry**: optional process-wide pool
//! - **SchemaLoader**: YAML schema files (feature `schema-loader`)

mod builder;
mod descriptor;
mod kind;
#[cfg(feature = "schema-loader")]
pub mod loader;
mod pool;
pub mod registry;

pub use builder::{FieldSpec, MessageDescriptorBuilder};
pub use descriptor::{EnumDescriptor, FieldDescriptor, MessageDescriptor, OneofDescriptor};
pub use kind::{Cardinality, FieldKind};
#[cfg(feature = "schema-loader")]
pub use loader::SchemaLoader;
pub use pool::{DescriptorPool, MessageType, PoolBuilder};
