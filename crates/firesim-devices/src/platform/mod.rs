// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Platform abstraction layer.
//!
//! This module provides traits that abstract over the two places drivers touch
//! the machine: the kernel-side register window of a channel, and the
//! consumer address space a region is mapped into. Production uses volatile
//! MMIO through a linear device aperture; tests use mock hardware on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Channels and regions                   │
//! └─────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Platform traits                      │
//! │      (`RegisterIo`, `IoMapper`, `AddressSpace`)         │
//! └─────────────────────────────────────────────────────────┘
//!            │                              │
//!            ▼                              ▼
//! ┌─────────────────────┐      ┌─────────────────────────────┐
//! │   `MockPlatform`    │      │  `LinearIoMapper`           │
//! │   (for testing)     │      │  `MmioWindow` (production)  │
//! └─────────────────────┘      └─────────────────────────────┘
//! ```


// Mock requires std, only available with std or test
#[cfg(any(test, feature = "std"))]
mod mock;
mod mmio;
mod traits;

#[cfg(any(test, feature = "std"))]
pub use mock::{MockAddressSpace, MockMapping, MockPlatform, MockRegisters};
pub use mmio::{LinearIoMapper, MmioWindow};
pub use traits::{AddressSpace, CacheAttr, IoMapper, MapError, PagePerms, RegisterIo};
