// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Register-pair channels.
//!
//! A channel is a fixed request register and a fixed response register inside
//! one resource. Consumers write a request and read back whatever the hardware
//! placed in the response register; the driver never echoes the request.
//!
//! All transfers on a channel are serialized by one guard, which also holds
//! the register window. A channel without a window is unbound and rejects
//! every transfer with [`DeviceError::NotBound`].

use alloc::boxed::Box;

use firesim_abi::layout::REGISTER_WIDTH;

use crate::error::DeviceError;
use crate::platform::RegisterIo;
use crate::resource::{HardwareResource, WordOffset};
use crate::user::{UserBuf, UserBufMut};


/// Size in bytes of every consumer transfer.
const TRANSFER_SIZE: usize = 4;

const _: () = assert!(TRANSFER_SIZE as u64 == REGISTER_WIDTH);

/// A request/response register pair with serialized access.
pub struct RegisterChannel {
    resource: HardwareResource,
    request: WordOffset,
    response: WordOffset,
    guard: spin::Mutex<Option<Box<dyn RegisterIo>>>,
}

impl RegisterChannel {
    /// Creates an unbound channel over `resource`.
    ///
    /// # Errors
    ///
    /// [`DeviceError::MalformedDescription`] if either offset is misaligned
    /// or its register does not fit inside the resource.
    pub fn new(
        resource: HardwareResource,
        request_offset: u64,
        response_offset: u64,
    ) -> Result<Self, DeviceError> {
        let request = resource
            .word(request_offset)
            .ok_or(DeviceError::MalformedDescription)?;
        let response = resource
            .word(response_offset)
            .ok_or(DeviceError::MalformedDescription)?;
        Ok(Self {
            resource,
            request,
            response,
            guard: spin::Mutex::new(None),
        })
    }

    /// The resource the registers live in.
    #[must_use]
    pub const fn resource(&self) -> &HardwareResource {
        &self.resource
    }

    /// Offset of the request register.
    #[must_use]
    pub const fn request_offset(&self) -> WordOffset {
        self.request
    }

    /// Offset of the response register.
    #[must_use]
    pub const fn response_offset(&self) -> WordOffset {
        self.response
    }

    /// Installs the register window, replacing any previous one.
    pub fn bind(&self, io: Box<dyn RegisterIo>) {
        *self.guard.lock() = Some(io);
    }

    /// Removes the register window, returning it if there was one.
    ///
    /// Waits for an in-flight transfer to finish.
    pub fn unbind(&self) -> Option<Box<dyn RegisterIo>> {
        self.guard.lock().take()
    }

    /// Whether a register window is installed.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.guard.lock().is_some()
    }

    /// Reads the response register.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotBound`] if no window is installed.
    pub fn read(&self) -> Result<u32, DeviceError> {
        let guard = self.guard.lock();
        let io = guard.as_deref().ok_or(DeviceError::NotBound)?;
        Ok(io.read32(self.response))
    }

    /// Writes the request register.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotBound`] if no window is installed.
    pub fn write(&self, value: u32) -> Result<(), DeviceError> {
        let guard = self.guard.lock();
        let io = guard.as_deref().ok_or(DeviceError::NotBound)?;
        io.write32(self.request, value);
        Ok(())
    }

    /// Reads the response register into a consumer buffer.
    ///
    /// The buffer must be exactly four bytes; the value is copied in native
    /// byte order while the guard is held. Returns the number of bytes
    /// transferred.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::InvalidSize`] for any other buffer length
    /// - [`DeviceError::NotBound`] if no window is installed
    /// - [`DeviceError::Fault`] if the buffer cannot be written
    pub fn read_into<B: UserBufMut + ?Sized>(&self, buf: &mut B) -> Result<usize, DeviceError> {
        if buf.len() != TRANSFER_SIZE {
            return Err(DeviceError::InvalidSize);
        }
        let guard = self.guard.lock();
        let io = guard.as_deref().ok_or(DeviceError::NotBound)?;
        let value = io.read32(self.response);
        buf.write_from(&value.to_ne_bytes())?;
        Ok(TRANSFER_SIZE)
    }

    /// Writes a consumer buffer into the request register.
    ///
    /// The buffer must be exactly four bytes, read in native byte order while
    /// the guard is held. Nothing reaches the register if the copy fails.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::InvalidSize`] for any other buffer length
    /// - [`DeviceError::NotBound`] if no window is installed
    /// - [`DeviceError::Fault`] if the buffer cannot be read
    pub fn write_from<B: UserBuf + ?Sized>(&self, buf: &B) -> Result<usize, DeviceError> {
        if buf.len() != TRANSFER_SIZE {
            return Err(DeviceError::InvalidSize);
        }
        let guard = self.guard.lock();
        let io = guard.as_deref().ok_or(DeviceError::NotBound)?;
        let mut bytes = [0u8; TRANSFER_SIZE];
        buf.read_into(&mut bytes)?;
        io.write32(self.request, u32::from_ne_bytes(bytes));
        Ok(TRANSFER_SIZE)
    }
}

impl core::fmt::Debug for RegisterChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterChannel")
            .field("resource", &self.resource)
            .field("request", &self.request)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}
