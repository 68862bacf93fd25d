// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared test infrastructure for integration tests.
//!
//! This module provides:
//! - [`init_tracing`] - Log output for failing tests (`RUST_LOG=debug`)
//! - [`dtb::DtbBuilder`] - Builds flattened device tree blobs in memory
//! - [`buffers::FaultingBuffer`] - A consumer buffer whose memory is never accessible
//! - board helpers for the devices the end-to-end scenarios use
//!
//! # Design
//!
//! This module is **not** a test file, so it must comply with full clippy rules.
//! Test-specific allowances (like `unwrap_used`) are only permitted in `*_test.rs` files.

#![allow(dead_code, reason = "each test binary uses a different subset")]

pub mod buffers;
pub mod dtb;

use firesim_devices::description::TableDescription;
use firesim_devices::{PAGE_SIZE, Paddr};

/// Installs a test-writer subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Base address of the FireSim manager registers.
pub const MANAGER_BASE: u64 = 0x1000;

/// Board with only the FireSim manager.
#[must_use]
pub fn manager_board() -> TableDescription {
    TableDescription::new().with_device(
        "fsim-manager@1000",
        &["ucbbar,fsim-manager"],
        Paddr::new(MANAGER_BASE),
        8,
    )
}

/// Board with the DRAM cache regions at `0x2000`/`0x3000`/`0x4000`.
#[must_use]
pub fn dram_cache_board() -> TableDescription {
    TableDescription::new()
        .with_node("dram-cache", &["ucbbar,dram-cache"], None)
        .with_device(
            "ext-tab@2000",
            &["ucbbar,dram-cache-ext-tab"],
            Paddr::new(0x2000),
            PAGE_SIZE,
        )
        .with_device(
            "mem@3000",
            &["ucbbar,dram-cache-mem"],
            Paddr::new(0x3000),
            1 << 30,
        )
        .with_device(
            "ctrl@4000",
            &["ucbbar,dram-cache-ctrl"],
            Paddr::new(0x4000),
            PAGE_SIZE,
        )
}
