// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Volatile register windows over a linearly mapped device aperture.
//!
//! On the target, device memory is reachable at a fixed offset from its
//! physical address (the kernel's device aperture). Remapping a resource is
//! then just address arithmetic; the accesses themselves must be volatile so
//! the compiler neither merges nor elides them.

use alloc::boxed::Box;

use firesim_abi::layout::REGISTER_WIDTH;
use firesim_abi::Vaddr;

use crate::platform::traits::{IoMapper, MapError, RegisterIo};
use crate::resource::{HardwareResource, WordOffset};

/// A window of 32-bit device registers at a fixed virtual address.
pub struct MmioWindow {
    base: Vaddr,
    len: u64,
}

impl MmioWindow {
    /// Creates a window over `len` bytes of registers at `base`.
    ///
    /// # Safety
    ///
    /// `base..base + len` must be mapped, 4-byte aligned device (or plain)
    /// memory that stays valid and is not aliased by Rust references for the
    /// lifetime of the window.
    #[must_use]
    pub const unsafe fn new(base: Vaddr, len: u64) -> Self {
        Self { base, len }
    }

    /// Virtual base of the window.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> Vaddr {
        self.base
    }

    /// Length of the window in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Whether the window covers no registers.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn register(&self, offset: WordOffset) -> Vaddr {
        debug_assert!(offset.as_u64() + REGISTER_WIDTH <= self.len);
        self.base.add(offset.as_u64())
    }
}

// SAFETY: the window only holds an address; concurrent access to the
// registers is serialized by the channel guard that owns the window.
unsafe impl Send for MmioWindow {}
// SAFETY: see `Send` above.
unsafe impl Sync for MmioWindow {}

impl RegisterIo for MmioWindow {
    fn read32(&self, offset: WordOffset) -> u32 {
        let addr = self.register(offset);
        // SAFETY: `offset` was validated against the resource this window
        // covers, and `new` guarantees the range is mapped and aligned.
        unsafe { core::ptr::read_volatile(addr.as_ptr::<u32>()) }
    }

    fn write32(&self, offset: WordOffset, value: u32) {
        let addr = self.register(offset);
        // SAFETY: as for `read32`.
        unsafe { core::ptr::write_volatile(addr.as_mut_ptr::<u32>(), value) }
    }
}

/// Remaps resources through a fixed physical-to-virtual offset.
#[derive(Debug)]
pub struct LinearIoMapper {
    aperture_offset: u64,
}

impl LinearIoMapper {
    /// Creates a mapper for a device aperture at `paddr + aperture_offset`.
    ///
    /// # Safety
    ///
    /// Every physical register region the registry resolves must be mapped
    /// as device memory at `paddr + aperture_offset` for as long as windows
    /// created by this mapper are alive.
    #[must_use]
    pub const unsafe fn new(aperture_offset: u64) -> Self {
        Self { aperture_offset }
    }
}

impl IoMapper for LinearIoMapper {
    fn ioremap(&self, resource: &HardwareResource) -> Result<Box<dyn RegisterIo>, MapError> {
        if resource.base().as_u64() % REGISTER_WIDTH != 0 {
            return Err(MapError::MisalignedAddress);
        }
        let base = resource
            .base()
            .as_u64()
            .checked_add(self.aperture_offset)
            .ok_or(MapError::OutsideAperture)?;
        if base.checked_add(resource.len()).is_none() {
            return Err(MapError::OutsideAperture);
        }
        // SAFETY: `new`'s contract covers every resolved region.
        let window = unsafe { MmioWindow::new(Vaddr::new(base), resource.len()) };
        Ok(Box::new(window))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::vec;

    use firesim_abi::Paddr;

    use super::*;

    #[test]
    fn window_reads_and_writes_backing_words() {
        let mut backing = vec![0u32; 4];
        backing[1] = 0x1234_5678;
        let base = Vaddr::new(backing.as_mut_ptr() as u64);
        let resource = HardwareResource::new("test,regs", Paddr::new(0x1000), 16).unwrap();

        // SAFETY: `backing` outlives the window and is only touched through it.
        let window = unsafe { MmioWindow::new(base, 16) };
        assert_eq!(window.read32(resource.word(4).unwrap()), 0x1234_5678);

        window.write32(resource.word(12).unwrap(), 0xDEAD_BEEF);
        assert_eq!(window.read32(resource.word(12).unwrap()), 0xDEAD_BEEF);
        drop(window);
        assert_eq!(backing[3], 0xDEAD_BEEF);
    }

    #[test]
    fn linear_mapper_offsets_base() {
        // SAFETY: the produced window is never accessed.
        let mapper = unsafe { LinearIoMapper::new(0xFFFF_FFC0_0000_0000) };
        let resource = HardwareResource::new("test,regs", Paddr::new(0x1000), 8).unwrap();
        assert!(mapper.ioremap(&resource).is_ok());
    }

    #[test]
    fn linear_mapper_rejects_overflow_and_misalignment() {
        // SAFETY: no window is produced.
        let mapper = unsafe { LinearIoMapper::new(u64::MAX - 0x100) };
        let resource = HardwareResource::new("test,regs", Paddr::new(0x1000), 8).unwrap();
        assert_eq!(mapper.ioremap(&resource).err(), Some(MapError::OutsideAperture));

        // SAFETY: no window is produced.
        let mapper = unsafe { LinearIoMapper::new(0) };
        let resource = HardwareResource::new("test,regs", Paddr::new(0x1002), 8).unwrap();
        assert_eq!(mapper.ioremap(&resource).err(), Some(MapError::MisalignedAddress));
    }
}
