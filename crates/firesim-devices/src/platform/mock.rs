// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock hardware for testing.
//!
//! This module provides register files, an I/O mapper, and a consumer address
//! space backed by host memory, allowing drivers to be exercised without the
//! FPGA behind them.

#![allow(clippy::panic)] // Test infrastructure - panicking on invalid input is correct

use std::boxed::Box;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::vec::Vec;

use firesim_abi::layout::{PAGE_SIZE, REGISTER_WIDTH};
use firesim_abi::{Paddr, Vaddr};

use crate::platform::traits::{AddressSpace, CacheAttr, IoMapper, MapError, PagePerms, RegisterIo};
use crate::resource::{HardwareResource, WordOffset};

/// A simulated register file.
///
/// The driver side accesses it through [`RegisterIo`]; tests act as the
/// hardware through [`MockRegisters::peek`] and [`MockRegisters::poke`].
///
/// Two behaviours can be switched on to stress the driver:
/// - *loopback*: a write to one register is mirrored into another, as a
///   device that answers every request immediately would do
/// - *torn writes*: every write lands as two 16-bit halves with a yield in
///   between, so an unserialized reader can observe half a value
pub struct MockRegisters {
    words: Box<[AtomicU32]>,
    loopback: Option<(u64, u64)>,
    torn_writes: bool,
    writes: AtomicUsize,
}

impl MockRegisters {
    /// Create a zeroed register file covering `len` bytes.
    #[must_use]
    pub fn new(len: u64) -> Self {
        let count = usize::try_from(len.div_ceil(REGISTER_WIDTH))
            .unwrap_or_else(|_| panic!("register file of {len} bytes too large"));
        Self {
            words: (0..count).map(|_| AtomicU32::new(0)).collect(),
            loopback: None,
            torn_writes: false,
            writes: AtomicUsize::new(0),
        }
    }

    /// Mirror every write to `request` into `response`.
    #[must_use]
    pub fn with_loopback(mut self, request: u64, response: u64) -> Self {
        let _ = self.index(request);
        let _ = self.index(response);
        self.loopback = Some((request, response));
        self
    }

    /// Split every write into two halves with a yield in between.
    #[must_use]
    pub fn with_torn_writes(mut self) -> Self {
        self.torn_writes = true;
        self
    }

    /// Size of the register file in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.words.len() as u64 * REGISTER_WIDTH
    }

    /// Whether the register file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Hardware-side read of the register at byte `offset`.
    #[must_use]
    pub fn peek(&self, offset: u64) -> u32 {
        self.words[self.index(offset)].load(Ordering::SeqCst)
    }

    /// Hardware-side update of the register at byte `offset`.
    pub fn poke(&self, offset: u64, value: u32) {
        self.words[self.index(offset)].store(value, Ordering::SeqCst);
    }

    /// Number of driver-side writes seen so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn index(&self, offset: u64) -> usize {
        assert!(
            offset % REGISTER_WIDTH == 0,
            "register offset {offset:#x} not word aligned"
        );
        let index = usize::try_from(offset / REGISTER_WIDTH)
            .unwrap_or_else(|_| panic!("register offset {offset:#x} too large"));
        assert!(
            index < self.words.len(),
            "register offset {offset:#x} beyond end {:#x}",
            self.len()
        );
        index
    }

    fn store(&self, offset: u64, value: u32) {
        let word = &self.words[self.index(offset)];
        if self.torn_writes {
            let old = word.load(Ordering::SeqCst);
            word.store((old & 0xFFFF_0000) | (value & 0x0000_FFFF), Ordering::SeqCst);
            std::thread::yield_now();
        }
        word.store(value, Ordering::SeqCst);
    }
}

impl RegisterIo for MockRegisters {
    fn read32(&self, offset: WordOffset) -> u32 {
        self.peek(offset.as_u64())
    }

    fn write32(&self, offset: WordOffset, value: u32) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.store(offset.as_u64(), value);
        if let Some((request, response)) = self.loopback {
            if request == offset.as_u64() {
                self.store(response, value);
            }
        }
    }
}

/// A mock platform whose devices are [`MockRegisters`] keyed by base address.
///
/// Register files can be installed up front to choose their behaviour; any
/// resource remapped without one gets a fresh zeroed file.
#[derive(Default)]
pub struct MockPlatform {
    devices: spin::Mutex<BTreeMap<Paddr, Arc<MockRegisters>>>,
    failure: spin::Mutex<Option<MapError>>,
    remaps: AtomicUsize,
}

impl MockPlatform {
    /// Create a platform with no devices installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `registers` as the device at `base`.
    pub fn install(&self, base: Paddr, registers: MockRegisters) -> Arc<MockRegisters> {
        let registers = Arc::new(registers);
        self.devices.lock().insert(base, Arc::clone(&registers));
        registers
    }

    /// The register file at `base`, if one was installed or remapped.
    #[must_use]
    pub fn registers(&self, base: Paddr) -> Option<Arc<MockRegisters>> {
        self.devices.lock().get(&base).cloned()
    }

    /// Make every following `ioremap` fail with `error`.
    pub fn fail_ioremap(&self, error: MapError) {
        *self.failure.lock() = Some(error);
    }

    /// Number of successful remaps.
    #[must_use]
    pub fn remap_count(&self) -> usize {
        self.remaps.load(Ordering::SeqCst)
    }
}

impl IoMapper for MockPlatform {
    fn ioremap(&self, resource: &HardwareResource) -> Result<Box<dyn RegisterIo>, MapError> {
        if let Some(error) = *self.failure.lock() {
            return Err(error);
        }
        let registers = Arc::clone(
            self.devices
                .lock()
                .entry(resource.base())
                .or_insert_with(|| Arc::new(MockRegisters::new(resource.len()))),
        );
        assert!(
            registers.len() >= resource.len(),
            "installed register file at {} is shorter than {resource:?}",
            resource.base()
        );
        self.remaps.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(registers))
    }
}

/// One range established in a [`MockAddressSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockMapping {
    /// Virtual start.
    pub vaddr: Vaddr,
    /// Physical start.
    pub paddr: Paddr,
    /// Length in bytes.
    pub size: u64,
    /// Permissions as requested.
    pub perms: PagePerms,
    /// Cache attributes as requested.
    pub cache: CacheAttr,
}

impl MockMapping {
    fn overlaps(&self, vaddr: Vaddr, size: u64) -> bool {
        let start = vaddr.as_u64();
        let end = start.saturating_add(size);
        let own_end = self.vaddr.as_u64().saturating_add(self.size);
        start < own_end && self.vaddr.as_u64() < end
    }
}

/// A consumer address space that records the ranges mapped into it.
///
/// Like a real page-table backend it only accepts page-aligned, page-sized,
/// non-overlapping ranges.
#[derive(Debug, Default)]
pub struct MockAddressSpace {
    mappings: Vec<MockMapping>,
    fail_next: Option<MapError>,
}

impl MockAddressSpace {
    /// Create an empty address space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `map_io_range` fail with `error`.
    pub fn fail_next(&mut self, error: MapError) {
        self.fail_next = Some(error);
    }

    /// All established mappings, in creation order.
    #[must_use]
    pub fn mappings(&self) -> &[MockMapping] {
        &self.mappings
    }

    /// Physical address backing `vaddr`, if mapped.
    #[must_use]
    pub fn translate(&self, vaddr: Vaddr) -> Option<Paddr> {
        self.mappings
            .iter()
            .find(|m| m.overlaps(vaddr, 1))
            .and_then(|m| m.paddr.checked_add(vaddr.as_u64() - m.vaddr.as_u64()))
    }

    /// Tear down the mapping starting at `vaddr`.
    ///
    /// Returns `false` if no mapping starts there.
    pub fn unmap(&mut self, vaddr: Vaddr) -> bool {
        let before = self.mappings.len();
        self.mappings.retain(|m| m.vaddr != vaddr);
        self.mappings.len() != before
    }
}

impl AddressSpace for MockAddressSpace {
    fn map_io_range(
        &mut self,
        vaddr: Vaddr,
        paddr: Paddr,
        size: u64,
        perms: PagePerms,
        cache: CacheAttr,
    ) -> Result<(), MapError> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }
        if !vaddr.is_page_aligned() || !paddr.is_page_aligned() || size == 0 || size % PAGE_SIZE != 0
        {
            return Err(MapError::MisalignedAddress);
        }
        if self.mappings.iter().any(|m| m.overlaps(vaddr, size)) {
            return Err(MapError::AlreadyMapped);
        }
        self.mappings.push(MockMapping {
            vaddr,
            paddr,
            size,
            perms,
            cache,
        });
        Ok(())
    }
}
