// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Consumer buffers.
//!
//! A transfer copies between a register value and memory owned by the
//! consumer. That memory may not be accessible (an unmapped user page, a
//! revoked grant), so the copy itself can fail and is modelled as a trait.
//! Plain byte slices are always accessible.

use crate::error::DeviceError;

/// Consumer memory a write reads from.
pub trait UserBuf {
    /// Length of the buffer in bytes.
    fn len(&self) -> usize;

    /// Whether the buffer is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the start of the buffer into `dst`.
    ///
    /// `dst.len()` never exceeds [`UserBuf::len`].
    ///
    /// # Errors
    ///
    /// [`DeviceError::Fault`] if the consumer memory is not accessible.
    fn read_into(&self, dst: &mut [u8]) -> Result<(), DeviceError>;
}

/// Consumer memory a read writes to.
pub trait UserBufMut {
    /// Length of the buffer in bytes.
    fn len(&self) -> usize;

    /// Whether the buffer is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies `src` into the start of the buffer.
    ///
    /// `src.len()` never exceeds [`UserBufMut::len`].
    ///
    /// # Errors
    ///
    /// [`DeviceError::Fault`] if the consumer memory is not accessible.
    fn write_from(&mut self, src: &[u8]) -> Result<(), DeviceError>;
}

impl UserBuf for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn read_into(&self, dst: &mut [u8]) -> Result<(), DeviceError> {
        let src = self.get(..dst.len()).ok_or(DeviceError::Fault)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl UserBufMut for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn write_from(&mut self, src: &[u8]) -> Result<(), DeviceError> {
        let dst = self.get_mut(..src.len()).ok_or(DeviceError::Fault)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl<const N: usize> UserBuf for [u8; N] {
    fn len(&self) -> usize {
        N
    }

    fn read_into(&self, dst: &mut [u8]) -> Result<(), DeviceError> {
        self.as_slice().read_into(dst)
    }
}

impl<const N: usize> UserBufMut for [u8; N] {
    fn len(&self) -> usize {
        N
    }

    fn write_from(&mut self, src: &[u8]) -> Result<(), DeviceError> {
        self.as_mut_slice().write_from(src)
    }
}
