// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reflective records: field access driven by descriptors, with no
//! compile-time knowledge of the message shape.

mod field;
mod list;
mod record;
mod value;

pub use field::AsField;
pub use list::{ListMut, ListView};
pub use record::{FieldMut, MutableRef, Record};
pub use value::{MessageView, Value, ValueRef};

pub(crate) use value::field_message_type;
