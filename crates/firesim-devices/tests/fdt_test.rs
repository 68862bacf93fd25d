// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Flattened device tree descriptions.
//!
//! Blobs are built in memory and read back through [`FdtDescription`], then
//! used to attach drivers exactly as the boot path would.

// Test code prioritizes clarity over defensive programming
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

mod common;

use common::dtb::DtbBuilder;
use common::init_tracing;
use firesim_devices::platform::MockPlatform;
use firesim_devices::{
    BUILTIN_DRIVERS, Backing, DeviceError, DeviceRegistry, FdtDescription, HardwareDescription, Paddr,
    ResourceLocator,
};

fn firesim_board() -> Vec<u8> {
    DtbBuilder::new()
        .cell_sizes(2, 2)
        .prop_strings("compatible", &["freechips,rocketchip-unknown"])
        .begin_node("soc")
        .cell_sizes(2, 2)
        .device("fsim-manager@1000", &["ucbbar,fsim-manager"], 0x1000, 8)
        .device("dram-cache@10000000", &["ucbbar,dram-cache"], 0x1000_0000, 0x1000)
        .device("ext-tab@2000", &["ucbbar,dram-cache-ext-tab"], 0x2000, 0x1000)
        .device("mem@100000000", &["ucbbar,dram-cache-mem"], 0x1_0000_0000, 1 << 30)
        .device("ctrl@4000", &["ucbbar,dram-cache-ctrl"], 0x4000, 0x1000)
        .device(
            "cache-controller@2010000",
            &["sifive,inclusivecache0", "cache"],
            0x0201_0000,
            0x1000,
        )
        .end_node()
        .finish()
}

#[test]
fn rejects_garbage() {
    init_tracing();
    assert_eq!(
        FdtDescription::new(&[0u8; 64]).err(),
        Some(DeviceError::MalformedDescription)
    );
    assert!(FdtDescription::new(&[]).is_err());
}

#[test]
fn rejects_truncated_blob() {
    let blob = firesim_board();
    assert!(FdtDescription::new(&blob[..blob.len() / 2]).is_err());
}

#[test]
fn finds_nodes_by_compatible() {
    let blob = firesim_board();
    let fdt = FdtDescription::new(&blob).unwrap();
    assert_eq!(fdt.total_size(), blob.len());

    let node = fdt.find_compatible("ucbbar,fsim-manager").unwrap();
    assert_eq!(node.name, "fsim-manager@1000");
    assert_eq!(node.reg, Some((Paddr::new(0x1000), 8)));

    // Any entry of the compatible list matches.
    let node = fdt.find_compatible("cache").unwrap();
    assert_eq!(node.name, "cache-controller@2010000");

    assert!(fdt.find_compatible("ucbbar,wallclock").is_none());
}

#[test]
fn decodes_wide_addresses() {
    let blob = firesim_board();
    let fdt = FdtDescription::new(&blob).unwrap();
    let locator = ResourceLocator::new(&fdt);

    let memory = locator.resolve("ucbbar,dram-cache-mem").unwrap();
    assert_eq!(memory.base(), Paddr::new(0x1_0000_0000));
    assert_eq!(memory.len(), 1 << 30);
}

#[test]
fn decodes_single_cell_entries() {
    let blob = DtbBuilder::new()
        .cell_sizes(1, 1)
        .begin_node("fsim-manager@1000")
        .prop_strings("compatible", &["ucbbar,fsim-manager"])
        .prop_cells("reg", &[0x1000, 0x8])
        .end_node()
        .finish();
    let fdt = FdtDescription::new(&blob).unwrap();
    let resource = ResourceLocator::new(&fdt)
        .resolve("ucbbar,fsim-manager")
        .unwrap();
    assert_eq!(resource.base(), Paddr::new(0x1000));
    assert_eq!(resource.len(), 8);
}

#[test]
fn node_without_reg_is_malformed() {
    let blob = DtbBuilder::new()
        .cell_sizes(2, 2)
        .begin_node("fsim-manager")
        .prop_strings("compatible", &["ucbbar,fsim-manager"])
        .end_node()
        .finish();
    let fdt = FdtDescription::new(&blob).unwrap();
    assert_eq!(
        ResourceLocator::new(&fdt).resolve("ucbbar,fsim-manager"),
        Err(DeviceError::MalformedDescription)
    );
}

#[test]
fn size_less_reg_is_malformed() {
    let blob = DtbBuilder::new()
        .cell_sizes(1, 0)
        .begin_node("fsim-manager@1000")
        .prop_strings("compatible", &["ucbbar,fsim-manager"])
        .prop_cells("reg", &[0x1000])
        .end_node()
        .finish();
    let fdt = FdtDescription::new(&blob).unwrap();
    assert_eq!(
        ResourceLocator::new(&fdt).resolve("ucbbar,fsim-manager"),
        Err(DeviceError::MalformedDescription)
    );
}

#[test]
fn short_reg_is_malformed() {
    let blob = DtbBuilder::new()
        .cell_sizes(2, 2)
        .begin_node("fsim-manager@1000")
        .prop_strings("compatible", &["ucbbar,fsim-manager"])
        .prop_cells("reg", &[0, 0x1000])
        .end_node()
        .finish();
    let fdt = FdtDescription::new(&blob).unwrap();
    assert_eq!(
        ResourceLocator::new(&fdt).resolve("ucbbar,fsim-manager"),
        Err(DeviceError::MalformedDescription)
    );
}

#[test]
fn probe_from_device_tree() {
    init_tracing();
    let blob = firesim_board();
    let fdt = FdtDescription::new(&blob).unwrap();
    let registry = DeviceRegistry::new(MockPlatform::new());

    let report = registry.probe(&fdt, BUILTIN_DRIVERS);
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.attached.len(), 3);

    let memory = registry.open("dram-cache-memory").unwrap();
    let Backing::Region(region) = memory.handle().backing() else {
        panic!("memory handle is not a region");
    };
    assert_eq!(region.resource().base(), Paddr::new(0x1_0000_0000));
}
