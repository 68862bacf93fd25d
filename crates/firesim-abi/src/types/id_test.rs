// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for device identifiers.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::id::{DeviceId, DeviceNumber};

#[test]
fn device_id_null() {
    assert!(DeviceId::NULL.is_null());
    assert!(DeviceId::default().is_null());
    assert!(!DeviceId::new(234).is_null());
}

#[test]
fn device_number_parts() {
    let number = DeviceNumber::new(DeviceId::new(240), 2);
    assert_eq!(number.major(), 240);
    assert_eq!(number.minor(), 2);
    assert_eq!(number.device(), DeviceId::new(240));
}

#[test]
fn device_number_display() {
    let number = DeviceNumber::new(DeviceId::new(234), 1);
    assert_eq!(format!("{number}"), "234:1");
    assert_eq!(format!("{number:?}"), "DeviceNumber(234:1)");
    assert_eq!(format!("{}", DeviceId::new(7)), "major:7");
}

#[test]
fn device_numbers_order_by_major_then_minor() {
    let a = DeviceNumber::new(DeviceId::new(234), 2);
    let b = DeviceNumber::new(DeviceId::new(235), 0);
    let c = DeviceNumber::new(DeviceId::new(235), 1);
    assert!(a < b);
    assert!(b < c);
}
