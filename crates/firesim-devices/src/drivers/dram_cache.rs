// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! DRAM cache controller.
//!
//! The cache exposes three regions, each mapped whole by the consumer:
//!
//! | Minor | Handle              | Contents                               |
//! |-------|---------------------|----------------------------------------|
//! | 0     | `dram-cache-exttab` | extent table, one entry per 1 GB extent |
//! | 1     | `dram-cache-memory` | the cached memory itself               |
//! | 2     | `dram-cache-ctrl`   | control registers                      |
//!
//! Logical addresses are 37 bits wide; the helpers here split them into an
//! extent index and an offset within the extent.

use firesim_abi::layout::dram_cache::{EXTENT_BYTES, EXTENT_SHIFT, EXTENT_TABLE_ENTRIES, LOGADDR_BITS};

use super::{AccessKind, AccessPointSpec, DriverDescriptor};

/// Compatible key of the cache device node.
pub const COMPATIBLE: &str = "ucbbar,dram-cache";

/// Compatible key of the extent table region.
pub const EXTENT_TABLE_KEY: &str = "ucbbar,dram-cache-ext-tab";

/// Compatible key of the memory region.
pub const MEMORY_KEY: &str = "ucbbar,dram-cache-mem";

/// Compatible key of the control region.
pub const CONTROL_KEY: &str = "ucbbar,dram-cache-ctrl";

/// Driver name.
pub const DEVICE_NAME: &str = "dram-cache";

/// The DRAM cache driver.
pub static DRIVER: DriverDescriptor = DriverDescriptor {
    name: DEVICE_NAME,
    compatible: COMPATIBLE,
    access_points: &[
        AccessPointSpec {
            name: "dram-cache-exttab",
            key: EXTENT_TABLE_KEY,
            kind: AccessKind::Region,
        },
        AccessPointSpec {
            name: "dram-cache-memory",
            key: MEMORY_KEY,
            kind: AccessKind::Region,
        },
        AccessPointSpec {
            name: "dram-cache-ctrl",
            key: CONTROL_KEY,
            kind: AccessKind::Region,
        },
    ],
};

/// Extent table index of a logical address.
///
/// Returns `None` for addresses wider than the logical address space.
#[must_use]
pub const fn extent_index(logical: u64) -> Option<u64> {
    if logical >> LOGADDR_BITS != 0 {
        return None;
    }
    Some(logical >> EXTENT_SHIFT)
}

/// Offset of a logical address within its extent.
#[must_use]
pub const fn extent_offset(logical: u64) -> u64 {
    logical & (EXTENT_BYTES - 1)
}

/// First logical address of extent `index`.
///
/// Returns `None` past the last extent table entry.
#[must_use]
pub const fn extent_base(index: u64) -> Option<u64> {
    if index >= EXTENT_TABLE_ENTRIES {
        return None;
    }
    Some(index << EXTENT_SHIFT)
}
