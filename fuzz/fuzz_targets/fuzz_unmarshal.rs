// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use protoflect::schemas::authz;
use protoflect::{codec, UnmarshalOptions};

fuzz_target!(|data: &[u8]| {
    let tight = UnmarshalOptions::new().recursion_limit(8);
    for ty in [
        authz::query_grants_request(),
        authz::query_grants_response(),
        authz::query_granter_grants_response(),
    ] {
        // Anything that decodes must re-encode to bytes that decode the same.
        if let Ok(record) = codec::unmarshal(data, &ty) {
            let bytes = codec::marshal(&record);
            assert_eq!(bytes.len(), codec::size(&record));
            let again = codec::unmarshal(&bytes, &ty).expect("re-decode");
            assert_eq!(again, record);
            assert_eq!(codec::marshal(&again), bytes);
        }
        let _ = codec::unmarshal_with(data, &ty, &tight);
    }
});
