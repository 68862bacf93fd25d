// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Driver descriptors.
//!
//! A driver is data: the compatible key its device is enumerated under and
//! the access points it exposes, each naming the resource it needs and how
//! that resource is presented. The registry does the rest.
//!
//! Access points are numbered in declaration order; that order is the minor
//! number a consumer sees.

pub mod dram_cache;
pub mod fsim_manager;
pub mod inclusive_cache;


/// How an access point presents its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// A request/response register pair at the given byte offsets.
    Channel {
        /// Offset of the request register.
        request: u64,
        /// Offset of the response register.
        response: u64,
    },
    /// The whole region, for direct mapping.
    Region,
}

/// One openable binding of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPointSpec {
    /// Handle name consumers open.
    pub name: &'static str,
    /// Compatible key of the resource behind it.
    pub key: &'static str,
    /// Presentation.
    pub kind: AccessKind,
}

/// A platform driver.
#[derive(Debug, PartialEq, Eq)]
pub struct DriverDescriptor {
    /// Driver name, used in log messages.
    pub name: &'static str,
    /// Compatible key the device node is enumerated under.
    pub compatible: &'static str,
    /// Access points in minor-number order.
    pub access_points: &'static [AccessPointSpec],
}

impl DriverDescriptor {
    /// The access point named `name`.
    #[must_use]
    pub fn access_point(&self, name: &str) -> Option<&'static AccessPointSpec> {
        self.access_points.iter().find(|ap| ap.name == name)
    }
}

/// Every driver in this crate, in probe order.
pub static BUILTIN_DRIVERS: &[&DriverDescriptor] = &[
    &fsim_manager::DRIVER,
    &dram_cache::DRIVER,
    &inclusive_cache::DRIVER,
];

/// The built-in driver for devices compatible with `key`.
#[must_use]
pub fn find_driver(key: &str) -> Option<&'static DriverDescriptor> {
    BUILTIN_DRIVERS.iter().copied().find(|d| d.compatible == key)
}
