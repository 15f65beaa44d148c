// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use protoflect::schema::SchemaLoader;
use protoflect::{codec, Record};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Every built pool must hold usable types.
    if let Ok(pool) = SchemaLoader::load_str(text) {
        for message in pool.messages() {
            let Some(ty) = pool.find_message(message.full_name()) else {
                panic!("{} missing from its own pool", message.full_name());
            };
            let empty = Record::new(&ty);
            assert!(codec::marshal(&empty).is_empty());
        }
    }
});
