// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Resource lookup by compatible key.

use crate::description::HardwareDescription;
use crate::error::DeviceError;
use crate::resource::HardwareResource;


/// Resolves compatible keys to hardware resources.
///
/// Pure lookup over a [`HardwareDescription`]: nothing is cached and nothing
/// is mapped.
pub struct ResourceLocator<'d, D: ?Sized> {
    description: &'d D,
}

impl<'d, D: HardwareDescription + ?Sized> ResourceLocator<'d, D> {
    /// A locator over `description`.
    #[must_use]
    pub const fn new(description: &'d D) -> Self {
        Self { description }
    }

    /// Whether any node carries `key` in its compatible list.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.description.find_compatible(key).is_some()
    }

    /// Resolves the first register region of the node compatible with `key`.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::NotFound`] if no node matches
    /// - [`DeviceError::MalformedDescription`] if the matching node has no
    ///   decodable `reg` entry, or the entry wraps the address space
    pub fn resolve(&self, key: &str) -> Result<HardwareResource, DeviceError> {
        let node = self
            .description
            .find_compatible(key)
            .ok_or(DeviceError::NotFound)?;

        let Some((base, len)) = node.reg else {
            tracing::error!(key, node = %node.name, "no usable \"reg\" entry");
            return Err(DeviceError::MalformedDescription);
        };

        HardwareResource::new(key, base, len).ok_or_else(|| {
            tracing::error!(key, node = %node.name, %base, len, "register region wraps");
            DeviceError::MalformedDescription
        })
    }

    /// Resolves a resource a device cannot work without.
    ///
    /// # Errors
    ///
    /// As [`Self::resolve`], except that an absent node is reported as
    /// [`DeviceError::MissingResource`] naming `key`.
    pub fn require(&self, key: &'static str) -> Result<HardwareResource, DeviceError> {
        self.resolve(key).map_err(|e| match e {
            DeviceError::NotFound => {
                tracing::error!(key, "required resource not in description");
                DeviceError::MissingResource { key }
            }
            other => other,
        })
    }
}
