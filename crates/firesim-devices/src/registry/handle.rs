// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Device handles and sessions.
//!
//! A [`DeviceHandle`] is one access point of an attached device. Consumers
//! open it to get a [`Session`]; any number of sessions may be open at once.
//!
//! # Lifetime
//!
//! Every handle carries a liveness lock. Session operations hold it shared
//! for their whole duration. Detach first raises a retiring flag that turns
//! new operations away, then takes the lock exclusively, which waits for
//! operations already in flight, marks the handle dead and unbinds the
//! channel. From then on every operation on a surviving session fails with
//! [`DeviceError::Gone`].

use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use firesim_abi::DeviceNumber;

use crate::channel::RegisterChannel;
use crate::error::DeviceError;
use crate::platform::AddressSpace;
use crate::region::{MapRequest, MappedRegion, Mapping};
use crate::user::{UserBuf, UserBufMut};

/// What a handle is backed by.
#[derive(Debug)]
pub enum Backing {
    /// A request/response register pair.
    Channel(RegisterChannel),
    /// A region exposed for mapping.
    Region(MappedRegion),
}

/// One openable access point of an attached device.
pub struct DeviceHandle {
    name: &'static str,
    number: DeviceNumber,
    backing: Backing,
    live: spin::RwLock<bool>,
    retiring: AtomicBool,
    sessions: AtomicUsize,
}

impl DeviceHandle {
    pub(crate) fn new(name: &'static str, number: DeviceNumber, backing: Backing) -> Self {
        Self {
            name,
            number,
            backing,
            live: spin::RwLock::new(true),
            retiring: AtomicBool::new(false),
            sessions: AtomicUsize::new(0),
        }
    }

    /// Handle name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Device number (major of the device, minor of this access point).
    #[must_use]
    pub const fn number(&self) -> DeviceNumber {
        self.number
    }

    /// The backing.
    #[must_use]
    pub const fn backing(&self) -> &Backing {
        &self.backing
    }

    /// Whether the device is still attached.
    #[must_use]
    pub fn is_live(&self) -> bool {
        *self.live.read()
    }

    /// Number of sessions currently open.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.load(Ordering::Acquire)
    }

    /// Opens a session.
    ///
    /// # Errors
    ///
    /// [`DeviceError::Gone`] if the device has been detached.
    pub fn open(self: &Arc<Self>) -> Result<Session, DeviceError> {
        let live = self.enter()?;
        self.sessions.fetch_add(1, Ordering::AcqRel);
        drop(live);
        Ok(Session {
            handle: Arc::clone(self),
        })
    }

    /// Marks the handle dead and unbinds its channel.
    ///
    /// Waits for in-flight operations. Returns the number of sessions that
    /// were still open.
    pub(crate) fn retire(&self) -> usize {
        // Turn new operations away so the write lock cannot starve.
        self.retiring.store(true, Ordering::Release);
        let mut live = self.live.write();
        *live = false;
        if let Backing::Channel(channel) = &self.backing {
            drop(channel.unbind());
        }
        self.sessions.load(Ordering::Acquire)
    }

    fn with_backing<R>(
        &self,
        op: impl FnOnce(&Backing) -> Result<R, DeviceError>,
    ) -> Result<R, DeviceError> {
        let live = self.enter()?;
        let result = op(&self.backing);
        drop(live);
        result
    }

    fn enter(&self) -> Result<spin::RwLockReadGuard<'_, bool>, DeviceError> {
        if self.retiring.load(Ordering::Acquire) {
            return Err(DeviceError::Gone);
        }
        let live = self.live.read();
        if !*live {
            return Err(DeviceError::Gone);
        }
        Ok(live)
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("name", &self.name)
            .field("number", &self.number)
            .field("backing", &self.backing)
            .field("sessions", &self.session_count())
            .finish_non_exhaustive()
    }
}

/// An open handle.
///
/// Dropping the session closes it.
pub struct Session {
    handle: Arc<DeviceHandle>,
}

impl Session {
    /// The handle this session was opened on.
    #[must_use]
    pub fn handle(&self) -> &DeviceHandle {
        &self.handle
    }

    /// Reads one register value into `buf`.
    ///
    /// Returns the number of bytes transferred, always 4.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::Gone`] after detach
    /// - [`DeviceError::Unsupported`] on a region handle
    /// - any error of [`RegisterChannel::read_into`]
    pub fn read<B: UserBufMut + ?Sized>(&self, buf: &mut B) -> Result<usize, DeviceError> {
        self.handle.with_backing(|backing| match backing {
            Backing::Channel(channel) => channel.read_into(buf),
            Backing::Region(_) => Err(DeviceError::Unsupported),
        })
    }

    /// Writes one register value from `buf`.
    ///
    /// Returns the number of bytes transferred, always 4.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::Gone`] after detach
    /// - [`DeviceError::Unsupported`] on a region handle
    /// - any error of [`RegisterChannel::write_from`]
    pub fn write<B: UserBuf + ?Sized>(&self, buf: &B) -> Result<usize, DeviceError> {
        self.handle.with_backing(|backing| match backing {
            Backing::Channel(channel) => channel.write_from(buf),
            Backing::Region(_) => Err(DeviceError::Unsupported),
        })
    }

    /// Maps part of the region into `space`.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::Gone`] after detach
    /// - [`DeviceError::Unsupported`] on a channel handle
    /// - any error of [`MappedRegion::map`]
    pub fn map<S: AddressSpace + ?Sized>(
        &self,
        space: &mut S,
        request: &MapRequest,
    ) -> Result<Mapping, DeviceError> {
        self.handle.with_backing(|backing| match backing {
            Backing::Region(region) => region.map(space, request),
            Backing::Channel(_) => Err(DeviceError::Unsupported),
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.handle.sessions.fetch_sub(1, Ordering::AcqRel);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("handle", &self.handle.name)
            .field("number", &self.handle.number)
            .finish()
    }
}
