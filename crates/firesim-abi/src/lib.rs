// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared definitions between the FireSim platform drivers and their consumers.
//!
//! This crate defines the contract at the driver/consumer boundary:
//! - Address newtypes (physical vs. virtual)
//! - Device numbers (major/minor) identifying access points
//! - Hardware layout constants (page geometry, register offsets, extents)
//! - Consumer-visible error codes
//!
//! # Design Principles
//!
//! - **No dependencies**: Pure data types, 100% host-testable
//! - **64-bit only**: register regions are described with 64-bit addresses
//!
//! # Modules
//!
//! - [`types`]: Address and device-number newtypes
//! - [`layout`]: Page geometry and per-device register layout
//! - [`errno`]: Linux-compatible error codes returned to consumers

#![cfg_attr(not(test), no_std)]

pub mod errno;
pub mod layout;
pub mod types;

// Re-export commonly used types at crate root
pub use errno::Errno;
pub use layout::{PAGE_SHIFT, PAGE_SIZE};
pub use types::{DeviceId, DeviceNumber, Paddr, Vaddr};
