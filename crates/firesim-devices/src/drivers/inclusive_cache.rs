// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! SiFive inclusive cache control port.

use super::{AccessKind, AccessPointSpec, DriverDescriptor};

/// Compatible key of the cache controller node and its register region.
pub const COMPATIBLE: &str = "sifive,inclusivecache0";

/// Handle name.
pub const DEVICE_NAME: &str = "inclusive-cache";

/// The inclusive cache driver.
pub static DRIVER: DriverDescriptor = DriverDescriptor {
    name: DEVICE_NAME,
    compatible: COMPATIBLE,
    access_points: &[AccessPointSpec {
        name: DEVICE_NAME,
        key: COMPATIBLE,
        kind: AccessKind::Region,
    }],
};
