// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Device identifiers.

use core::fmt;

/// Identifier of one attached device.
///
/// Every attached device owns exactly one major number; the major doubles as
/// the device's identity inside its registry. Major 0 is reserved/invalid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct DeviceId(u32);

impl DeviceId {
    /// The invalid/null device ID.
    pub const NULL: Self = Self(0);

    /// Creates a device ID from a major number.
    #[inline]
    #[must_use]
    pub const fn new(major: u32) -> Self {
        Self(major)
    }

    /// Returns the major number.
    #[inline]
    #[must_use]
    pub const fn major(self) -> u32 {
        self.0
    }

    /// Checks if this is the null/invalid device ID.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceId({})", self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "major:{}", self.0)
    }
}

/// A `(major, minor)` pair naming one access point.
///
/// The major identifies the owning device, the minor the access point within
/// it. Minors are dense and start at 0 in the order the driver declares its
/// access points.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DeviceNumber {
    device: DeviceId,
    minor: u32,
}

impl DeviceNumber {
    /// Creates a device number.
    #[inline]
    #[must_use]
    pub const fn new(device: DeviceId, minor: u32) -> Self {
        Self { device, minor }
    }

    /// The owning device.
    #[inline]
    #[must_use]
    pub const fn device(self) -> DeviceId {
        self.device
    }

    /// The major number.
    #[inline]
    #[must_use]
    pub const fn major(self) -> u32 {
        self.device.major()
    }

    /// The minor number.
    #[inline]
    #[must_use]
    pub const fn minor(self) -> u32 {
        self.minor
    }
}

impl fmt::Debug for DeviceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceNumber({}:{})", self.major(), self.minor)
    }
}

impl fmt::Display for DeviceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major(), self.minor)
    }
}
