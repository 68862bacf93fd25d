// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Raw-region exposure.
//!
//! A [`MappedRegion`] hands a consumer direct access to a whole physical
//! register region by mapping it into the consumer's address space. The only
//! check performed is the bounds check; the consumer's choice of virtual
//! address, protection, and cache attributes is passed through unchanged.

use firesim_abi::{Paddr, Vaddr};

use crate::error::DeviceError;
use crate::platform::{AddressSpace, CacheAttr, PagePerms};
use crate::resource::HardwareResource;


/// A consumer's request to map part of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapRequest {
    /// Where the consumer wants the mapping.
    pub vaddr: Vaddr,
    /// Byte offset into the region.
    pub offset: u64,
    /// Length in bytes.
    pub size: u64,
    /// Requested protection.
    pub perms: PagePerms,
    /// Requested cache attributes.
    pub cache: CacheAttr,
}

impl MapRequest {
    /// A read-write device-memory request.
    #[must_use]
    pub const fn new(vaddr: Vaddr, offset: u64, size: u64) -> Self {
        Self {
            vaddr,
            offset,
            size,
            perms: PagePerms::RW,
            cache: CacheAttr::Device,
        }
    }

    /// Replaces the requested protection.
    #[must_use]
    pub const fn with_perms(mut self, perms: PagePerms) -> Self {
        self.perms = perms;
        self
    }

    /// Replaces the requested cache attributes.
    #[must_use]
    pub const fn with_cache(mut self, cache: CacheAttr) -> Self {
        self.cache = cache;
        self
    }
}

/// A mapping established on a consumer's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    /// Virtual start in the consumer's space.
    pub vaddr: Vaddr,
    /// Physical start.
    pub paddr: Paddr,
    /// Length in bytes.
    pub size: u64,
    /// Protection applied.
    pub perms: PagePerms,
    /// Cache attributes applied.
    pub cache: CacheAttr,
}

/// A whole-region exposer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRegion {
    resource: HardwareResource,
}

impl MappedRegion {
    /// Exposes `resource`.
    #[must_use]
    pub const fn new(resource: HardwareResource) -> Self {
        Self { resource }
    }

    /// The exposed resource.
    #[must_use]
    pub const fn resource(&self) -> &HardwareResource {
        &self.resource
    }

    /// Maps `[base + offset, base + offset + size)` into `space`.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::OutOfRange`] if the range ends past
    ///   [`HardwareResource::mappable_len`] (overflow included)
    /// - [`DeviceError::MapFailed`] if the address space refuses the mapping
    pub fn map<S: AddressSpace + ?Sized>(
        &self,
        space: &mut S,
        request: &MapRequest,
    ) -> Result<Mapping, DeviceError> {
        if !self.resource.fits_mapping(request.offset, request.size) {
            return Err(DeviceError::OutOfRange);
        }
        let paddr = self
            .resource
            .paddr_at(request.offset)
            .ok_or(DeviceError::OutOfRange)?;

        space
            .map_io_range(
                request.vaddr,
                paddr,
                request.size,
                request.perms,
                request.cache,
            )
            .map_err(DeviceError::MapFailed)?;

        tracing::debug!(
            key = self.resource.key(),
            vaddr = %request.vaddr,
            paddr = %paddr,
            size = request.size,
            "mapped region"
        );

        Ok(Mapping {
            vaddr: request.vaddr,
            paddr,
            size: request.size,
            perms: request.perms,
            cache: request.cache,
        })
    }
}
