// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Platform abstraction traits.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use firesim_abi::{Paddr, Vaddr};

use crate::resource::{HardwareResource, WordOffset};

/// A window onto a device's 32-bit registers.
///
/// Implementations perform the access with I/O semantics (volatile, no
/// merging); the channel guard above them provides the exclusion.
pub trait RegisterIo: Send + Sync {
    /// Read the 32-bit register at `offset`.
    fn read32(&self, offset: WordOffset) -> u32;

    /// Write the 32-bit register at `offset`.
    fn write32(&self, offset: WordOffset, value: u32);
}

impl<T: RegisterIo + ?Sized> RegisterIo for Arc<T> {
    fn read32(&self, offset: WordOffset) -> u32 {
        (**self).read32(offset)
    }

    fn write32(&self, offset: WordOffset, value: u32) {
        (**self).write32(offset, value);
    }
}

impl<T: RegisterIo + ?Sized> RegisterIo for Box<T> {
    fn read32(&self, offset: WordOffset) -> u32 {
        (**self).read32(offset)
    }

    fn write32(&self, offset: WordOffset, value: u32) {
        (**self).write32(offset, value);
    }
}

/// Maps a device's register region into the kernel so it can be accessed
/// through [`RegisterIo`].
pub trait IoMapper {
    /// Remap the whole of `resource` for register access.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be reached from the kernel.
    fn ioremap(&self, resource: &HardwareResource) -> Result<Box<dyn RegisterIo>, MapError>;
}

impl<M: IoMapper + ?Sized> IoMapper for &M {
    fn ioremap(&self, resource: &HardwareResource) -> Result<Box<dyn RegisterIo>, MapError> {
        (**self).ioremap(resource)
    }
}

impl<M: IoMapper + ?Sized> IoMapper for Arc<M> {
    fn ioremap(&self, resource: &HardwareResource) -> Result<Box<dyn RegisterIo>, MapError> {
        (**self).ioremap(resource)
    }
}

/// A consumer's virtual address space.
///
/// Region exposers install physical ranges here on the consumer's behalf.
/// Teardown of an established mapping belongs to the address space owner.
pub trait AddressSpace {
    /// Map `size` bytes of physical memory at `paddr` to `vaddr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping cannot be created.
    fn map_io_range(
        &mut self,
        vaddr: Vaddr,
        paddr: Paddr,
        size: u64,
        perms: PagePerms,
        cache: CacheAttr,
    ) -> Result<(), MapError>;
}

/// Page permissions for memory mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePerms {
    /// Allow reads.
    pub read: bool,
    /// Allow writes.
    pub write: bool,
    /// Allow execution.
    pub execute: bool,
}

impl PagePerms {
    /// Read-only permissions.
    pub const RO: Self = Self {
        read: true,
        write: false,
        execute: false,
    };

    /// Read-write permissions.
    pub const RW: Self = Self {
        read: true,
        write: true,
        execute: false,
    };

    /// Read-write-execute permissions (rarely used).
    pub const RWX: Self = Self {
        read: true,
        write: true,
        execute: true,
    };
}

/// Cache attributes for memory mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAttr {
    /// Normal cached memory.
    Cached,
    /// Uncached memory.
    Uncached,
    /// Write-combining.
    WriteCombine,
    /// Device memory (strongly ordered, for MMIO).
    Device,
}

/// Errors that can occur during page mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// Virtual address is already mapped.
    AlreadyMapped,
    /// Insufficient resources to create mapping.
    InsufficientResources,
    /// Address or size is not properly aligned.
    MisalignedAddress,
    /// Permission denied for this operation.
    PermissionDenied,
    /// Physical range lies outside the reachable device aperture.
    OutsideAperture,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyMapped => write!(f, "virtual address already mapped"),
            Self::InsufficientResources => write!(f, "insufficient resources"),
            Self::MisalignedAddress => write!(f, "address not properly aligned"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::OutsideAperture => write!(f, "outside device aperture"),
        }
    }
}

// Compile-time verification of PagePerms constants
const _: () = {
    assert!(PagePerms::RO.read);
    assert!(!PagePerms::RO.write);
    assert!(!PagePerms::RO.execute);

    assert!(PagePerms::RW.read);
    assert!(PagePerms::RW.write);
    assert!(!PagePerms::RW.execute);
};
