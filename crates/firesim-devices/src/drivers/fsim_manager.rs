// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! FireSim manager.
//!
//! The simulation host is driven through one request register and answers in
//! one response register. Requests and responses are opaque 32-bit words.

use firesim_abi::layout::fsim_manager::{REQUEST_OFFSET, RESPONSE_OFFSET};

use super::{AccessKind, AccessPointSpec, DriverDescriptor};

/// Compatible key of the manager node and of its register region.
pub const COMPATIBLE: &str = "ucbbar,fsim-manager";

/// Handle name.
pub const DEVICE_NAME: &str = "fsim-manager";

/// The FireSim manager driver.
pub static DRIVER: DriverDescriptor = DriverDescriptor {
    name: DEVICE_NAME,
    compatible: COMPATIBLE,
    access_points: &[AccessPointSpec {
        name: DEVICE_NAME,
        key: COMPATIBLE,
        kind: AccessKind::Channel {
            request: REQUEST_OFFSET,
            response: RESPONSE_OFFSET,
        },
    }],
};
