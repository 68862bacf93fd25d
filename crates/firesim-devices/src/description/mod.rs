// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hardware descriptions.
//!
//! A hardware description enumerates devices by compatible string, each with
//! the register regions it occupies. Two sources are provided:
//!
//! - [`FdtDescription`] reads a flattened device tree blob, as handed over by
//!   the boot loader on the target
//! - [`TableDescription`] is a fixed table built in code, for boards without
//!   a device tree and for tests

use alloc::string::String;
use alloc::vec::Vec;

use firesim_abi::Paddr;

mod flattened;


pub use flattened::FdtDescription;

/// One device node, reduced to what the locator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionNode {
    /// Node name as it appears in the description.
    pub name: String,
    /// First register entry as `(base, length)`.
    ///
    /// `None` if the node has no `reg` or it cannot be decoded with the
    /// parent's cell sizes.
    pub reg: Option<(Paddr, u64)>,
}

/// A source of device nodes.
pub trait HardwareDescription {
    /// The first node whose compatible list contains `key`.
    fn find_compatible(&self, key: &str) -> Option<DescriptionNode>;
}

impl<D: HardwareDescription + ?Sized> HardwareDescription for &D {
    fn find_compatible(&self, key: &str) -> Option<DescriptionNode> {
        (**self).find_compatible(key)
    }
}

/// An entry of a [`TableDescription`].
#[derive(Debug, Clone)]
struct TableEntry {
    node: DescriptionNode,
    compatible: Vec<String>,
}

/// A hardware description held as a fixed table.
///
/// ```
/// use firesim_devices::description::{HardwareDescription, TableDescription};
/// use firesim_devices::Paddr;
///
/// let table = TableDescription::new()
///     .with_device("fsim-manager@1000", &["ucbbar,fsim-manager"], Paddr::new(0x1000), 8);
/// assert!(table.find_compatible("ucbbar,fsim-manager").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableDescription {
    entries: Vec<TableEntry>,
}

impl TableDescription {
    /// An empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a node with one register region.
    #[must_use]
    pub fn with_device(self, name: &str, compatible: &[&str], base: Paddr, len: u64) -> Self {
        self.with_node(name, compatible, Some((base, len)))
    }

    /// Adds a node with an explicit, possibly absent, register entry.
    #[must_use]
    pub fn with_node(mut self, name: &str, compatible: &[&str], reg: Option<(Paddr, u64)>) -> Self {
        self.entries.push(TableEntry {
            node: DescriptionNode {
                name: String::from(name),
                reg,
            },
            compatible: compatible.iter().map(|c| String::from(*c)).collect(),
        });
        self
    }

    /// Number of nodes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HardwareDescription for TableDescription {
    fn find_compatible(&self, key: &str) -> Option<DescriptionNode> {
        self.entries
            .iter()
            .find(|entry| entry.compatible.iter().any(|c| c == key))
            .map(|entry| entry.node.clone())
    }
}
