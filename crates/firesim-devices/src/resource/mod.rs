// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hardware resources.
//!
//! A [`HardwareResource`] is one physical register region as declared by the
//! hardware description. It is the only place offsets into a region are
//! validated: register access goes through [`WordOffset`]s it hands out, and
//! mapping requests are checked against [`HardwareResource::mappable_len`].

use alloc::string::String;
use core::fmt;

use firesim_abi::layout::{PAGE_SIZE, REGISTER_WIDTH};
use firesim_abi::Paddr;


/// One physical register region.
///
/// Immutable once resolved. Owned by the registry for the lifetime of the
/// device that uses it.
#[derive(Clone, PartialEq, Eq)]
pub struct HardwareResource {
    key: String,
    base: Paddr,
    len: u64,
}

impl HardwareResource {
    /// Creates a resource from a resolved description entry.
    ///
    /// Returns `None` if the region would wrap the physical address space.
    #[must_use]
    pub fn new(key: impl Into<String>, base: Paddr, len: u64) -> Option<Self> {
        if base.checked_add(len).is_none() {
            return None;
        }
        Some(Self {
            key: key.into(),
            base,
            len,
        })
    }

    /// Compatible key this resource was resolved from.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Physical base address.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> Paddr {
        self.base
    }

    /// Declared length in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Whether the description declared an empty region.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length used to bound mapping requests.
    ///
    /// Regions shorter than a page are treated as one full page: the control
    /// and extent-table blocks are declared smaller than the page the
    /// consumer has to map.
    #[inline]
    #[must_use]
    pub const fn mappable_len(&self) -> u64 {
        if self.len < PAGE_SIZE {
            PAGE_SIZE
        } else {
            self.len
        }
    }

    /// Whether `[offset, offset + size)` fits within [`Self::mappable_len`].
    #[must_use]
    pub const fn fits_mapping(&self, offset: u64, size: u64) -> bool {
        match offset.checked_add(size) {
            Some(end) => end <= self.mappable_len(),
            None => false,
        }
    }

    /// Physical address of byte `offset` of the region.
    ///
    /// Only offsets within [`Self::mappable_len`] are translated.
    #[must_use]
    pub const fn paddr_at(&self, offset: u64) -> Option<Paddr> {
        if offset > self.mappable_len() {
            return None;
        }
        self.base.checked_add(offset)
    }

    /// Validates a 32-bit register offset.
    ///
    /// Returns `None` unless `offset` is word aligned and the whole word lies
    /// inside the declared length.
    #[must_use]
    pub const fn word(&self, offset: u64) -> Option<WordOffset> {
        if offset % REGISTER_WIDTH != 0 {
            return None;
        }
        match offset.checked_add(REGISTER_WIDTH) {
            Some(end) if end <= self.len => Some(WordOffset(offset)),
            _ => None,
        }
    }
}

impl fmt::Debug for HardwareResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardwareResource({} @ {} + {:#x})", self.key, self.base, self.len)
    }
}

/// A validated byte offset of a 32-bit register inside one resource.
///
/// Only [`HardwareResource::word`] creates these, so any `WordOffset` a
/// register window receives is aligned and in bounds for the resource it
/// was taken from.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordOffset(u64);

impl WordOffset {
    /// Byte offset from the start of the region.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Index of the word when the region is viewed as `[u32]`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0 / REGISTER_WIDTH
    }
}

impl fmt::Debug for WordOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordOffset({:#x})", self.0)
    }
}
