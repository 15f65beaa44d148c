// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec Benchmark
//!
//! Measures marshal / unmarshal on the authz query responses:
//! - small request (two strings)
//! - response with N grants, each holding nested Any and Timestamp

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use protoflect::schemas::authz;
use protoflect::{codec, Record};

fn grants_response(n: usize) -> Record {
    let mut resp = Record::new(&authz::query_grants_response());
    {
        let mut grants = resp.mutable_list("grants").expect("grants");
        for i in 0..n {
            let grant = grants.append_mutable().expect("grant");
            let any = grant.mutable_message("authorization").expect("any");
            any.set("type_url", "/cosmos.bank.v1beta1.SendAuthorization")
                .expect("type_url");
            any.set("value", vec![0xAB; 64]).expect("value");
            grant
                .mutable_message("expiration")
                .expect("expiration")
                .set("seconds", 1_700_000_000 + i as i64)
                .expect("seconds");
        }
    }
    resp.mutable_message("pagination")
        .expect("pagination")
        .set("total", n as u64)
        .expect("total");
    resp
}

fn bench_small_request(c: &mut Criterion) {
    let mut req = Record::new(&authz::query_grants_request());
    req.set("granter", "cosmos1granter").expect("granter");
    req.set("grantee", "cosmos1grantee").expect("grantee");
    let bytes = codec::marshal(&req);
    let ty = authz::query_grants_request();

    c.bench_function("marshal_grants_request", |b| {
        b.iter(|| codec::marshal(black_box(&req)))
    });
    c.bench_function("unmarshal_grants_request", |b| {
        b.iter(|| codec::unmarshal(black_box(&bytes), &ty).expect("decode"))
    });
}

fn bench_grants_response(c: &mut Criterion) {
    let ty = authz::query_grants_response();
    let mut group = c.benchmark_group("grants_response");
    for n in [1usize, 16, 256] {
        let resp = grants_response(n);
        let bytes = codec::marshal(&resp);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("marshal", n), &resp, |b, resp| {
            b.iter(|| codec::marshal(black_box(resp)))
        });
        group.bench_with_input(BenchmarkId::new("unmarshal", n), &bytes, |b, bytes| {
            b.iter(|| codec::unmarshal(black_box(bytes), &ty).expect("decode"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_small_request, bench_grants_response);
criterion_main!(benches);
