// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hardware layout constants.
//!
//! Page geometry shared by every mapping, the register layout of the FireSim
//! manager, the DRAM cache extent geometry, and the dynamic device-number
//! range drivers draw their majors from.

/// One gigabyte in bytes.
const GB: u64 = 1024 * 1024 * 1024;

/// One kilobyte in bytes.
const KB: u64 = 1024;

/// Standard page size (4 KB).
pub const PAGE_SIZE: u64 = 4 * KB;

/// Page size shift (log2 of `PAGE_SIZE`).
pub const PAGE_SHIFT: u32 = 12;

/// Width in bytes of every register transfer.
pub const REGISTER_WIDTH: u64 = 4;

// =============================================================================
// Device numbers
// =============================================================================

/// First major number handed out to attached devices.
pub const FIRST_DYNAMIC_MAJOR: u32 = 234;

/// Last major number handed out to attached devices (inclusive).
pub const LAST_DYNAMIC_MAJOR: u32 = 254;

// =============================================================================
// FireSim manager
// =============================================================================

/// FireSim manager register layout.
pub mod fsim_manager {
    /// Byte offset of the request register (consumer writes land here).
    pub const REQUEST_OFFSET: u64 = 0;

    /// Byte offset of the response register (consumer reads come from here).
    pub const RESPONSE_OFFSET: u64 = 4;
}

// =============================================================================
// DRAM cache
// =============================================================================

/// DRAM cache extent geometry.
///
/// The cache covers a 37-bit logical address space split into 1 GB extents;
/// the extent table holds one entry per extent.
pub mod dram_cache {
    use super::{GB, PAGE_SHIFT};

    /// Width of a logical address.
    pub const LOGADDR_BITS: u32 = 37;

    /// log2 of the extent size.
    pub const EXTENT_SHIFT: u32 = 30;

    /// Size of one extent in bytes.
    pub const EXTENT_BYTES: u64 = 1 << EXTENT_SHIFT;

    /// Number of entries in the extent table.
    pub const EXTENT_TABLE_ENTRIES: u64 = 1 << (LOGADDR_BITS - EXTENT_SHIFT);

    /// Number of pages backing one extent.
    pub const PAGES_PER_EXTENT: u64 = 1 << (EXTENT_SHIFT - PAGE_SHIFT);

    const _: () = assert!(EXTENT_BYTES == GB);
}

// Compile-time verification of layout invariants
const _: () = {
    assert!(PAGE_SIZE == 1 << PAGE_SHIFT);
    assert!(FIRST_DYNAMIC_MAJOR > 0);
    assert!(FIRST_DYNAMIC_MAJOR <= LAST_DYNAMIC_MAJOR);
    assert!(fsim_manager::REQUEST_OFFSET % REGISTER_WIDTH == 0);
    assert!(fsim_manager::RESPONSE_OFFSET % REGISTER_WIDTH == 0);
    assert!(fsim_manager::REQUEST_OFFSET != fsim_manager::RESPONSE_OFFSET);
    assert!(dram_cache::EXTENT_TABLE_ENTRIES == 128);
    assert!(dram_cache::PAGES_PER_EXTENT * PAGE_SIZE == dram_cache::EXTENT_BYTES);
};
