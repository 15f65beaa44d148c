// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec constants and decode options.
//!
//! Wire-format limits live here and nowhere else. `UnmarshalOptions` carries
//! the per-call knobs of the decode path.

/// Smallest legal field number.
pub const MIN_FIELD_NUMBER: u32 = 1;

/// Largest legal field number (29 bits remain after the 3-bit wire type).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// First field number reserved for the protobuf implementation.
pub const RESERVED_FIELD_NUMBER_START: u32 = 19_000;

/// Last field number reserved for the protobuf implementation.
pub const RESERVED_FIELD_NUMBER_END: u32 = 19_999;

/// Longest possible varint encoding of a u64.
pub const MAX_VARINT_LEN: usize = 10;

/// Default bound on message (and group) nesting during decode.
pub const DEFAULT_RECURSION_LIMIT: usize = 100;

/// Options for the decode path.
///
/// ```
/// use protoflect::UnmarshalOptions;
///
/// let opts = UnmarshalOptions::new().discard_unknown(true).recursion_limit(32);
/// assert!(opts.discards_unknown());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnmarshalOptions {
    discard_unknown: bool,
    recursion_limit: usize,
}

impl UnmarshalOptions {
    /// Default options: keep unknown fields, nesting bounded by
    /// [`DEFAULT_RECURSION_LIMIT`].
    pub const fn new() -> Self {
        Self {
            discard_unknown: false,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Drop wire data for unrecognized field numbers instead of preserving it.
    pub const fn discard_unknown(mut self, discard: bool) -> Self {
        self.discard_unknown = discard;
        self
    }

    /// Maximum nesting depth of messages and groups.
    pub const fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub const fn discards_unknown(&self) -> bool {
        self.discard_unknown
    }

    pub const fn limit(&self) -> usize {
        self.recursion_limit
    }
}

impl Default for UnmarshalOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `number` may be declared in a schema.
pub const fn is_valid_field_number(number: u32) -> bool {
    number >= MIN_FIELD_NUMBER
        && number <= MAX_FIELD_NUMBER
        && !(number >= RESERVED_FIELD_NUMBER_START && number <= RESERVED_FIELD_NUMBER_END)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_number_bounds() {
        assert!(!is_valid_field_number(0));
        assert!(is_valid_field_number(1));
        assert!(is_valid_field_number(MAX_FIELD_NUMBER));
        assert!(!is_valid_field_number(MAX_FIELD_NUMBER + 1));
        assert!(!is_valid_field_number(19_000));
        assert!(!is_valid_field_number(19_999));
        assert!(is_valid_field_number(20_000));
    }

    #[test]
    fn test_unmarshal_options_defaults() {
        let opts = UnmarshalOptions::default();
        assert!(!opts.discards_unknown());
        assert_eq!(opts.limit(), DEFAULT_RECURSION_LIMIT);
    }
}
