// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Flattened device tree descriptions.

use alloc::string::String;

use fdt::Fdt;
use firesim_abi::Paddr;

use super::{DescriptionNode, HardwareDescription};
use crate::error::DeviceError;

/// A hardware description read from a flattened device tree blob.
///
/// `reg` entries are decoded with the parent node's `#address-cells` and
/// `#size-cells`. A node whose cell sizes give no length (`#size-cells = <0>`)
/// has no usable register entry.
pub struct FdtDescription<'a> {
    fdt: Fdt<'a>,
}

impl<'a> FdtDescription<'a> {
    /// Parses the blob header.
    ///
    /// # Errors
    ///
    /// [`DeviceError::MalformedDescription`] if `blob` is not a valid
    /// flattened device tree.
    pub fn new(blob: &'a [u8]) -> Result<Self, DeviceError> {
        let fdt = Fdt::new(blob).map_err(|e| {
            tracing::error!(error = ?e, "invalid device tree blob");
            DeviceError::MalformedDescription
        })?;
        Ok(Self { fdt })
    }

    /// Total size of the blob as recorded in its header.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.fdt.total_size()
    }
}

impl HardwareDescription for FdtDescription<'_> {
    fn find_compatible(&self, key: &str) -> Option<DescriptionNode> {
        let node = self.fdt.find_compatible(&[key])?;
        let reg = node.reg().and_then(|mut regions| regions.next()).and_then(|region| {
            let len = region.size?;
            Some((
                Paddr::new(region.starting_address.addr() as u64),
                len as u64,
            ))
        });
        Some(DescriptionNode {
            name: String::from(node.name),
            reg,
        })
    }
}

impl core::fmt::Debug for FdtDescription<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FdtDescription")
            .field("total_size", &self.fdt.total_size())
            .finish()
    }
}
