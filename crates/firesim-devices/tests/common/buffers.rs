// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Consumer buffers for failure paths.

use firesim_devices::{DeviceError, UserBuf, UserBufMut};

/// A consumer buffer of a given length whose memory is never accessible,
/// like a pointer into an unmapped page.
#[derive(Debug, Clone, Copy)]
pub struct FaultingBuffer {
    len: usize,
}

impl FaultingBuffer {
    /// A faulting buffer claiming `len` bytes.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len }
    }
}

impl UserBuf for FaultingBuffer {
    fn len(&self) -> usize {
        self.len
    }

    fn read_into(&self, _dst: &mut [u8]) -> Result<(), DeviceError> {
        Err(DeviceError::Fault)
    }
}

impl UserBufMut for FaultingBuffer {
    fn len(&self) -> usize {
        self.len
    }

    fn write_from(&mut self, _src: &[u8]) -> Result<(), DeviceError> {
        Err(DeviceError::Fault)
    }
}
