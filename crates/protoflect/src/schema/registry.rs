// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide descriptor pool.
//!
//! Installed once, read by everyone, never torn down.

use super::pool::{DescriptorPool, MessageType};
use crate::error::{Error, Result};
use std::sync::{Arc, OnceLock};

static GLOBAL_POOL: OnceLock<Arc<DescriptorPool>> = OnceLock::new();

/// Install the global pool. A second call fails with
/// [`Error::RegistryAlreadyInitialized`].
pub fn install(pool: Arc<DescriptorPool>) -> Result<()> {
    let count = pool.messages().len();
    GLOBAL_POOL
        .set(pool)
        .map_err(|_| Error::RegistryAlreadyInitialized)?;
    log::debug!("[registry] global pool installed ({} messages)", count);
    Ok(())
}

/// The installed pool, if any.
pub fn global() -> Option<&'static Arc<DescriptorPool>> {
    GLOBAL_POOL.get()
}

/// Return the installed pool, installing `init()` first if there is none.
pub fn get_or_install<F>(init: F) -> &'static Arc<DescriptorPool>
where
    F: FnOnce() -> Arc<DescriptorPool>,
{
    GLOBAL_POOL.get_or_init(|| {
        log::debug!("[registry] installing global pool on first use");
        init()
    })
}

/// Look up a message type in the installed pool.
pub fn find_message(full_name: &str) -> Option<MessageType> {
    global()?.find_message(full_name)
}
