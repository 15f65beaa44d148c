// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field selectors.

use crate::error::{Error, Result};
use crate::schema::{FieldDescriptor, MessageDescriptor};

/// Anything that names a field of a message: its name, its number, or its
/// descriptor.
pub trait AsField {
    fn resolve<'d>(&self, message: &'d MessageDescriptor) -> Result<&'d FieldDescriptor>;
}

impl AsField for &str {
    fn resolve<'d>(&self, message: &'d MessageDescriptor) -> Result<&'d FieldDescriptor> {
        message
            .field_by_name(self)
            .ok_or_else(|| Error::unknown_field(message.full_name(), *self))
    }
}

impl AsField for u32 {
    fn resolve<'d>(&self, message: &'d MessageDescriptor) -> Result<&'d FieldDescriptor> {
        message
            .field_by_number(*self)
            .ok_or_else(|| Error::unknown_field(message.full_name(), format!("#{}", self)))
    }
}

/// Descriptors select by full name, so one from another message is rejected.
impl AsField for &FieldDescriptor {
    fn resolve<'d>(&self, message: &'d MessageDescriptor) -> Result<&'d FieldDescriptor> {
        message
            .field_by_name(self.name())
            .filter(|fd| fd.full_name() == self.full_name())
            .ok_or_else(|| Error::unknown_field(message.full_name(), self.full_name()))
    }
}
