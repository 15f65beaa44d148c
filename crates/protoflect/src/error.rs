// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by the wire, schema, reflection and codec layers.
//!
//! Decode errors are terminal for the call that produced them: the record
//! being filled must be discarded. Reflection errors point at a caller bug
//! (wrong field name, wrong value type) and are returned rather than panicking.

use crate::wire::WireType;
use std::fmt;

/// Errors returned by `protoflect`.
///
/// # Example
///
/// ```
/// use protoflect::{codec, schemas::authz, Error};
///
/// // granter: declares 5 bytes, carries 1.
/// let result = codec::unmarshal(&[0x0A, 0x05, b'a'], &authz::query_grants_request());
/// assert!(matches!(result, Err(Error::TruncatedInput)));
/// ```
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Wire Errors
    // ========================================================================
    /// Buffer ended in the middle of a tag, varint or payload.
    TruncatedInput,
    /// Varint continued past 64 bits of shift.
    IntegerOverflow,
    /// Declared length is negative once interpreted as signed, or the end index overflows.
    InvalidLength,
    /// Field number out of range, or a wire type that may not start a field.
    IllegalTag { field_number: u64, wire_type: u8 },
    /// Wire type on the wire disagrees with the field's declared kind.
    WireTypeMismatch {
        field: String,
        expected: WireType,
        found: WireType,
    },
    /// String field payload is not UTF-8.
    InvalidUtf8 { field: String },
    /// Messages or groups nested deeper than the configured limit.
    RecursionLimitExceeded { limit: usize },

    // ========================================================================
    // Reflection Errors
    // ========================================================================
    /// Field or oneof name/number is not declared by the message.
    UnknownField { message: String, field: String },
    /// `mutable()` on a field that has no composite value.
    NotMutable { message: String, field: String },
    /// Value variant does not fit the field kind (or nested message type).
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    /// List index past the end.
    IndexOutOfBounds { index: usize, length: usize },

    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// Descriptor set rejected while building a pool.
    InvalidSchema(String),
    /// Global descriptor pool was already installed.
    RegistryAlreadyInitialized,
    /// Schema file could not be parsed.
    SchemaParse(String),
    /// I/O error while reading a schema file.
    Io(std::io::Error),
}

impl Error {
    /// True for errors raised while reading wire data.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::TruncatedInput
                | Error::IntegerOverflow
                | Error::InvalidLength
                | Error::IllegalTag { .. }
                | Error::WireTypeMismatch { .. }
                | Error::InvalidUtf8 { .. }
                | Error::RecursionLimitExceeded { .. }
        )
    }

    pub(crate) fn unknown_field(message: &str, field: impl Into<String>) -> Self {
        Error::UnknownField {
            message: message.to_string(),
            field: field.into(),
        }
    }
}

impl fmt::Display for Error {
    // @audit-ok: Simple pattern matching - error message dispatch table
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Wire
            Error::TruncatedInput => write!(f, "Truncated input: buffer ended mid-field"),
            Error::IntegerOverflow => write!(f, "Integer overflow: varint exceeds 64 bits"),
            Error::InvalidLength => write!(f, "Invalid length prefix"),
            Error::IllegalTag {
                field_number,
                wire_type,
            } => write!(
                f,
                "Illegal tag: field number {} (wire type {})",
                field_number, wire_type
            ),
            Error::WireTypeMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "Wrong wire type for field {}: expected {}, found {}",
                field, expected, found
            ),
            Error::InvalidUtf8 { field } => write!(f, "Invalid UTF-8 in string field {}", field),
            Error::RecursionLimitExceeded { limit } => {
                write!(f, "Recursion limit exceeded: nesting deeper than {}", limit)
            }
            // Reflection
            Error::UnknownField { message, field } => {
                write!(f, "Message {} has no field {}", message, field)
            }
            Error::NotMutable { message, field } => {
                write!(f, "Field {} of message {} is not mutable", field, message)
            }
            Error::TypeMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "Type mismatch for field {}: expected {}, found {}",
                field, expected, found
            ),
            Error::IndexOutOfBounds { index, length } => {
                write!(f, "Index out of bounds: {} >= {}", index, length)
            }
            // Schema
            Error::InvalidSchema(msg) => write!(f, "Invalid schema: {}", msg),
            Error::RegistryAlreadyInitialized => {
                write!(f, "Global descriptor pool already installed")
            }
            Error::SchemaParse(msg) => write!(f, "Schema parse error: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Convenient alias for results carrying [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_variants() {
        assert_eq!(
            Error::TruncatedInput.to_string(),
            "Truncated input: buffer ended mid-field"
        );
        let err = Error::WireTypeMismatch {
            field: "granter".into(),
            expected: WireType::LengthDelimited,
            found: WireType::Varint,
        };
        assert_eq!(
            err.to_string(),
            "Wrong wire type for field granter: expected LEN, found VARINT"
        );
        let err = Error::unknown_field("pkg.Msg", "nope");
        assert_eq!(err.to_string(), "Message pkg.Msg has no field nope");
    }

    #[test]
    fn test_decode_error_classification() {
        assert!(Error::IntegerOverflow.is_decode_error());
        assert!(Error::IllegalTag {
            field_number: 0,
            wire_type: 0
        }
        .is_decode_error());
        assert!(!Error::RegistryAlreadyInitialized.is_decode_error());
        assert!(!Error::IndexOutOfBounds {
            index: 3,
            length: 1
        }
        .is_decode_error());
    }
}
