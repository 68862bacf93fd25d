// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # FireSim platform devices
//!
//! Register-mapped resource exposure for FPGA-hosted simulation hardware: the
//! FireSim manager control registers, the DRAM cache controller, and the
//! SiFive inclusive-cache controller.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐   resolve(key)   ┌──────────────────────────┐
//! │  HardwareDescription │ ◄─────────────── │     ResourceLocator      │
//! │  (FDT / fixed table) │                  └────────────┬─────────────┘
//! └──────────────────────┘                               │ HardwareResource
//!                                                        ▼
//!                        ┌──────────────────────────────────────────────┐
//!                        │               DeviceRegistry                 │
//!                        │  attach / probe / open / detach              │
//!                        └───────────┬──────────────────────┬───────────┘
//!                                    ▼                      ▼
//!                        ┌──────────────────────┐ ┌──────────────────────┐
//!                        │   RegisterChannel    │ │     MappedRegion     │
//!                        │ (read/write, 4 byte) │ │   (map into space)   │
//!                        └──────────┬───────────┘ └──────────┬───────────┘
//!                                   ▼                        ▼
//!                           `RegisterIo` window       `AddressSpace`
//! ```
//!
//! Drivers are plain descriptors ([`drivers`]): a device key plus the access
//! points it exposes. The registry resolves every access point's resource
//! before binding anything, so an attach either yields all handles of a device
//! or none of them.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` + `alloc` without the `std` feature. The `std`
//! feature (on by default) adds the mock hardware used on the development
//! host.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

pub mod channel;
pub mod description;
pub mod drivers;
pub mod error;
pub mod locator;
pub mod platform;
pub mod region;
pub mod registry;
pub mod resource;
pub mod user;

// Re-export commonly used types at crate root
pub use channel::RegisterChannel;
pub use description::{DescriptionNode, FdtDescription, HardwareDescription, TableDescription};
pub use drivers::{AccessKind, AccessPointSpec, BUILTIN_DRIVERS, DriverDescriptor};
pub use error::DeviceError;
pub use firesim_abi::{DeviceId, DeviceNumber, Errno, PAGE_SIZE, Paddr, Vaddr};
pub use locator::ResourceLocator;
pub use platform::{AddressSpace, CacheAttr, IoMapper, MapError, PagePerms, RegisterIo};
pub use region::{MapRequest, MappedRegion, Mapping};
pub use registry::{Backing, DeviceHandle, DeviceRegistry, ProbeReport, Session};
pub use resource::{HardwareResource, WordOffset};
pub use user::{UserBuf, UserBufMut};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
