// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `cosmos.authz.v1beta1` query messages and the types they reference.
//!
//! Field numbers match the published `.proto` files, so encodings are
//! byte-compatible with any other protobuf implementation of these types.

use crate::schema::{DescriptorPool, FieldKind, MessageDescriptorBuilder, MessageType, PoolBuilder};
use std::sync::{Arc, OnceLock};

pub const QUERY_GRANTS_REQUEST: &str = "cosmos.authz.v1beta1.QueryGrantsRequest";
pub const QUERY_GRANTS_RESPONSE: &str = "cosmos.authz.v1beta1.QueryGrantsResponse";
pub const QUERY_GRANTER_GRANTS_REQUEST: &str = "cosmos.authz.v1beta1.QueryGranterGrantsRequest";
pub const QUERY_GRANTER_GRANTS_RESPONSE: &str = "cosmos.authz.v1beta1.QueryGranterGrantsResponse";
pub const GRANT: &str = "cosmos.authz.v1beta1.Grant";
pub const PAGE_REQUEST: &str = "cosmos.base.query.v1beta1.PageRequest";
pub const PAGE_RESPONSE: &str = "cosmos.base.query.v1beta1.PageResponse";
pub const ANY: &str = "google.protobuf.Any";
pub const TIMESTAMP: &str = "google.protobuf.Timestamp";

static POOL: OnceLock<Arc<DescriptorPool>> = OnceLock::new();

/// Pool holding every type of this module, built on first use.
pub fn pool() -> &'static Arc<DescriptorPool> {
    POOL.get_or_init(|| builder().build().unwrap_or_else(|e| panic!("authz schema: {}", e)))
}

/// Declarations of the authz types, for combining with other schemas.
pub fn builder() -> PoolBuilder {
    PoolBuilder::new()
        .message(
            MessageDescriptorBuilder::new(ANY)
                .field("type_url", 1, FieldKind::String)
                .field("value", 2, FieldKind::Bytes),
        )
        .message(
            MessageDescriptorBuilder::new(TIMESTAMP)
                .field("seconds", 1, FieldKind::Int64)
                .field("nanos", 2, FieldKind::Int32),
        )
        .message(
            MessageDescriptorBuilder::new(PAGE_REQUEST)
                .field("key", 1, FieldKind::Bytes)
                .field("offset", 2, FieldKind::Uint64)
                .field("limit", 3, FieldKind::Uint64)
                .field("count_total", 4, FieldKind::Bool)
                .field("reverse", 5, FieldKind::Bool),
        )
        .message(
            MessageDescriptorBuilder::new(PAGE_RESPONSE)
                .field("next_key", 1, FieldKind::Bytes)
                .field("total", 2, FieldKind::Uint64),
        )
        .message(
            MessageDescriptorBuilder::new(GRANT)
                .message("authorization", 1, ANY)
                .message("expiration", 2, TIMESTAMP),
        )
        .message(
            MessageDescriptorBuilder::new(QUERY_GRANTS_REQUEST)
                .field("granter", 1, FieldKind::String)
                .field("grantee", 2, FieldKind::String)
                .field("msg_type_url", 3, FieldKind::String)
                .message("pagination", 4, PAGE_REQUEST),
        )
        .message(
            MessageDescriptorBuilder::new(QUERY_GRANTS_RESPONSE)
                .repeated_message("grants", 1, GRANT)
                .message("pagination", 2, PAGE_RESPONSE),
        )
        .message(
            MessageDescriptorBuilder::new(QUERY_GRANTER_GRANTS_REQUEST)
                .field("granter", 1, FieldKind::String)
                .message("pagination", 2, PAGE_REQUEST),
        )
        .message(
            MessageDescriptorBuilder::new(QUERY_GRANTER_GRANTS_RESPONSE)
                .repeated_message("grants", 1, GRANT)
                .message("pagination", 2, PAGE_RESPONSE),
        )
}

fn message(name: &str) -> MessageType {
    pool()
        .find_message(name)
        .unwrap_or_else(|| panic!("authz schema lacks {}", name))
}

pub fn query_grants_request() -> MessageType {
    message(QUERY_GRANTS_REQUEST)
}

pub fn query_grants_response() -> MessageType {
    message(QUERY_GRANTS_RESPONSE)
}

pub fn query_granter_grants_request() -> MessageType {
    message(QUERY_GRANTER_GRANTS_REQUEST)
}

pub fn query_granter_grants_response() -> MessageType {
    message(QUERY_GRANTER_GRANTS_RESPONSE)
}

pub fn grant() -> MessageType {
    message(GRANT)
}

pub fn page_request() -> MessageType {
    message(PAGE_REQUEST)
}

pub fn page_response() -> MessageType {
    message(PAGE_RESPONSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_resolves_all_types() {
        let pool = pool();
        assert_eq!(pool.messages().len(), 9);
        let resp = query_grants_response();
        let grants = resp.descriptor().field_by_name("grants").expect("grants");
        assert!(grants.is_repeated());
        assert_eq!(resp.field_type(grants), Some(grant()));
        let pagination = query_grants_request()
            .descriptor()
            .field_by_number(4)
            .map(|f| f.type_name().map(str::to_string));
        assert_eq!(pagination, Some(Some(PAGE_REQUEST.to_string())));
    }
}
