// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Device error taxonomy.
//!
//! Every failure path returns its own variant; [`DeviceError::errno`] maps
//! it to the code a consumer observes.

use core::fmt;

use firesim_abi::Errno;

use crate::platform::MapError;

/// Errors produced while discovering, attaching, or operating on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// No description node or access point matches the requested key/name.
    NotFound,
    /// A matching description node has no usable address/size metadata.
    MalformedDescription,
    /// A resource required by the device is absent from the description.
    MissingResource {
        /// Compatible key of the absent resource.
        key: &'static str,
    },
    /// Operation on a channel that has no register window bound.
    NotBound,
    /// Read or write of anything other than one 32-bit register.
    InvalidSize,
    /// Mapping request extends past the end of the region.
    OutOfRange,
    /// Consumer memory could not be accessed during a transfer.
    Fault,
    /// The handle's device has been detached.
    Gone,
    /// The handle's backing does not provide this operation.
    Unsupported,
    /// The driver is already attached to this registry.
    Busy,
    /// No device numbers are left in the dynamic range.
    NoDeviceNumbers,
    /// The register window for a channel could not be remapped.
    IoRemap(MapError),
    /// The consumer mapping could not be established.
    MapFailed(MapError),
}

impl DeviceError {
    /// The consumer-visible error code.
    #[must_use]
    pub const fn errno(self) -> Errno {
        match self {
            Self::NotFound => Errno::ENOENT,
            Self::MalformedDescription
            | Self::MissingResource { .. }
            | Self::InvalidSize
            | Self::OutOfRange
            | Self::Unsupported => Errno::EINVAL,
            Self::NotBound | Self::Gone => Errno::ENODEV,
            Self::Fault => Errno::EFAULT,
            Self::Busy | Self::NoDeviceNumbers => Errno::EBUSY,
            Self::IoRemap(_) | Self::MapFailed(_) => Errno::EIO,
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::MalformedDescription => write!(f, "hardware description node has no usable \"reg\""),
            Self::MissingResource { key } => write!(f, "required resource {key} is missing"),
            Self::NotBound => write!(f, "channel has no register window bound"),
            Self::InvalidSize => write!(f, "transfers must be exactly 4 bytes"),
            Self::OutOfRange => write!(f, "mapping exceeds region"),
            Self::Fault => write!(f, "consumer buffer not accessible"),
            Self::Gone => write!(f, "device has been detached"),
            Self::Unsupported => write!(f, "operation not supported by this access point"),
            Self::Busy => write!(f, "driver already attached"),
            Self::NoDeviceNumbers => write!(f, "no device numbers available"),
            Self::IoRemap(e) => write!(f, "could not remap register window: {e}"),
            Self::MapFailed(e) => write!(f, "could not establish mapping: {e}"),
        }
    }
}
