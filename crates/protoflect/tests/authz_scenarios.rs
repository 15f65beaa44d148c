// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// End-to-end scenarios on the built-in cosmos.authz.v1beta1 query messages.

#![allow(clippy::unreadable_literal)]

use protoflect::schemas::authz;
use protoflect::wire::WireType;
use protoflect::{
    codec, Error, FieldKind, MessageDescriptorBuilder, PoolBuilder, Record, UnmarshalOptions,
    Value,
};

fn grants_request() -> Record {
    let mut req = Record::new(&authz::query_grants_request());
    req.set("granter", "addr1").expect("granter");
    req.set("grantee", "addr2").expect("grantee");
    req.set("msg_type_url", "").expect("msg_type_url");
    req
}

#[test]
fn granter_grantee_only_encoding() {
    let req = grants_request();
    assert!(!req.has("msg_type_url").expect("has"));
    assert!(!req.has("pagination").expect("has"));

    let bytes = codec::marshal(&req);
    let mut expected = vec![0x0A, 0x05];
    expected.extend_from_slice(b"addr1");
    expected.extend_from_slice(&[0x12, 0x05]);
    expected.extend_from_slice(b"addr2");
    assert_eq!(bytes, expected);
    assert_eq!(codec::size(&req), 14);
}

#[test]
fn single_varint_tag_is_truncated() {
    let result = codec::unmarshal(&[0x08], &authz::query_grants_request());
    assert!(matches!(result, Err(Error::TruncatedInput)));
}

#[test]
fn truncate_repeated_message_keeps_first() {
    let ty = authz::query_grants_response();
    let mut resp = Record::new(&ty);
    {
        let mut grants = resp.mutable_list("grants").expect("grants");
        for i in 0..3i64 {
            grants
                .append_mutable()
                .expect("grant")
                .mutable_message("expiration")
                .expect("expiration")
                .set("seconds", 1_700_000_000 + i)
                .expect("seconds");
        }
        assert_eq!(grants.len(), 3);
        let first = grants.get(0).expect("first").to_value();

        grants.truncate(1);
        assert_eq!(grants.len(), 1);
        assert_eq!(grants.get(0).expect("kept").to_value(), first);
        grants.truncate(5);
        assert_eq!(grants.len(), 1);
        assert!(matches!(
            grants.get(1),
            Err(Error::IndexOutOfBounds {
                index: 1,
                length: 1
            })
        ));
    }
    let decoded = codec::unmarshal(&codec::marshal(&resp), &ty).expect("decode");
    assert_eq!(decoded, resp);
}

#[test]
fn full_response_roundtrip() {
    let ty = authz::query_granter_grants_response();
    let mut resp = Record::new(&ty);
    {
        let mut grants = resp.mutable_list("grants").expect("grants");
        let grant = grants.append_mutable().expect("grant");
        let any = grant.mutable_message("authorization").expect("authorization");
        any.set("type_url", "/cosmos.authz.v1beta1.GenericAuthorization")
            .expect("type_url");
        any.set("value", vec![0x0A, 0x03, b'f', b'o', b'o'])
            .expect("value");
        grant
            .mutable_message("expiration")
            .expect("expiration")
            .set("nanos", 500i32)
            .expect("nanos");
    }
    {
        let page = resp.mutable_message("pagination").expect("pagination");
        page.set("next_key", vec![0xFF, 0x00]).expect("next_key");
        page.set("total", 42u64).expect("total");
    }

    let bytes = codec::marshal(&resp);
    assert_eq!(bytes.len(), codec::size(&resp));
    assert_eq!(bytes[0], 0x0A);
    let decoded = codec::unmarshal(&bytes, &ty).expect("decode");
    assert_eq!(decoded, resp);
    assert_eq!(codec::marshal(&decoded), bytes);

    let page = decoded.get("pagination").expect("pagination");
    let page = page.as_message().expect("message");
    assert_eq!(page.get("total").expect("total").as_u64(), Some(42));
}

#[test]
fn unknown_fields_survive_roundtrip() {
    let ty = authz::query_granter_grants_request();
    // granter = "g", #7 varint 150, #8 fixed32, #9 LEN "zz"
    let bytes = [
        0x0A, 0x01, b'g', 0x38, 0x96, 0x01, 0x45, 1, 2, 3, 4, 0x4A, 0x02, b'z', b'z',
    ];
    let rec = codec::unmarshal(&bytes, &ty).expect("decode");
    assert_eq!(rec.unknown(), &bytes[3..]);
    assert_eq!(codec::marshal(&rec), bytes);

    let discard = UnmarshalOptions::new().discard_unknown(true);
    let stripped = codec::unmarshal_with(&bytes, &ty, &discard).expect("decode");
    assert_eq!(codec::marshal(&stripped), [0x0A, 0x01, b'g']);
}

#[test]
fn string_field_sent_as_varint_is_rejected() {
    let bytes = [0x0A, 0x05, b'a', b'b', b'c', b'd', b'e', 0x10, 0x01];
    let err = codec::unmarshal(&bytes, &authz::query_grants_request())
        .expect_err("grantee as varint");
    match err {
        Error::WireTypeMismatch {
            field,
            expected,
            found,
        } => {
            assert_eq!(field, "cosmos.authz.v1beta1.QueryGrantsRequest.grantee");
            assert_eq!(expected, WireType::LengthDelimited);
            assert_eq!(found, WireType::Varint);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn malformed_tags_and_varints() {
    let ty = authz::query_grants_request();
    // End-group wire type.
    assert!(matches!(
        codec::unmarshal(&[0x0C], &ty),
        Err(Error::IllegalTag { wire_type: 4, .. })
    ));
    // Field number zero.
    assert!(matches!(
        codec::unmarshal(&[0x02, 0x00], &ty),
        Err(Error::IllegalTag { field_number: 0, .. })
    ));
    // Unknown field with an 11-byte varint.
    let mut bytes = vec![0x50];
    bytes.extend_from_slice(&[0xFF; 10]);
    bytes.push(0x01);
    assert!(matches!(codec::unmarshal(&bytes, &ty), Err(Error::IntegerOverflow)));
}

#[test]
fn reflective_errors() {
    let ty = authz::query_grants_request();
    let mut req = Record::new(&ty);
    assert!(matches!(req.mutable("granter"), Err(Error::NotMutable { .. })));
    assert!(matches!(req.get("no_such_field"), Err(Error::UnknownField { .. })));
    assert!(matches!(req.set("pagination", "x"), Err(Error::TypeMismatch { .. })));

    // A PageResponse is not a PageRequest.
    let wrong = Record::new(&authz::page_response());
    assert!(matches!(
        req.set("pagination", Value::Message(wrong)),
        Err(Error::TypeMismatch { .. })
    ));
    let right = Record::new(&authz::page_request());
    req.set("pagination", right).expect("page request");
    assert!(req.has("pagination").expect("has"));
}

#[test]
fn same_named_message_from_another_pool_is_rejected() {
    let foreign = PoolBuilder::new()
        .message(
            MessageDescriptorBuilder::new("cosmos.base.query.v1beta1.PageRequest")
                .field("key", 1, FieldKind::Uint64),
        )
        .build()
        .expect("foreign pool");
    let foreign_page = foreign
        .find_message("cosmos.base.query.v1beta1.PageRequest")
        .expect("foreign page request");
    let mut impostor = Record::new(&foreign_page);
    impostor.set("key", 7u64).expect("key");

    let mut req = grants_request();
    assert!(matches!(
        req.set("pagination", impostor),
        Err(Error::TypeMismatch { found, .. }) if found.contains("another pool")
    ));
    assert!(!req.has("pagination").expect("has"));
    // The request still encodes as a plain QueryGrantsRequest.
    assert_eq!(codec::marshal(&req), codec::marshal(&grants_request()));
}

#[test]
fn unknown_groups_count_toward_recursion_limit() {
    let ty = authz::query_grants_request();
    // #9 group holding an empty #10 group.
    let groups = [0x4B, 0x53, 0x54, 0x4C];
    let strict = UnmarshalOptions::new().recursion_limit(0);
    assert!(matches!(
        codec::unmarshal_with(&groups, &ty, &strict),
        Err(Error::RecursionLimitExceeded { limit: 0 })
    ));
    let shallow = UnmarshalOptions::new().recursion_limit(1);
    assert!(matches!(
        codec::unmarshal_with(&groups, &ty, &shallow),
        Err(Error::RecursionLimitExceeded { limit: 1 })
    ));
    let rec = codec::unmarshal(&groups, &ty).expect("default limit");
    assert_eq!(rec.unknown(), &groups);
    assert_eq!(codec::marshal(&rec), groups);

    // The same groups inside pagination start one level deeper.
    let nested = [0x22, 0x04, 0x4B, 0x53, 0x54, 0x4C];
    for limit in 0..3 {
        let opts = UnmarshalOptions::new().recursion_limit(limit);
        assert!(
            matches!(
                codec::unmarshal_with(&nested, &ty, &opts),
                Err(Error::RecursionLimitExceeded { .. })
            ),
            "limit {}",
            limit
        );
    }
    let opts = UnmarshalOptions::new().recursion_limit(3);
    let rec = codec::unmarshal_with(&nested, &ty, &opts).expect("limit 3");
    assert_eq!(codec::marshal(&rec), nested);

    // Discarding unknown fields does not lift the limit.
    let discard = UnmarshalOptions::new().recursion_limit(0).discard_unknown(true);
    assert!(codec::unmarshal_with(&groups, &ty, &discard).is_err());
}

#[test]
fn range_visits_populated_fields_in_order() {
    let mut req = grants_request();
    req.mutable_message("pagination")
        .expect("pagination")
        .set("limit", 10u64)
        .expect("limit");
    let mut names = Vec::new();
    req.range(|fd, _| {
        names.push(fd.name().to_string());
        true
    });
    assert_eq!(names, ["granter", "grantee", "pagination"]);
}
