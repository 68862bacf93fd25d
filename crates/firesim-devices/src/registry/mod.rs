// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Device registry.
//!
//! The registry owns every attached device: its resources, channels, regions,
//! and the handles consumers open. Attaching a driver resolves all of its
//! access points first and binds nothing unless every one of them resolved,
//! remapped, and got a device number.
//!
//! # Device numbers
//!
//! Each attached device owns one major from the dynamic range
//! (`FIRST_DYNAMIC_MAJOR..=LAST_DYNAMIC_MAJOR`); its access points are the
//! minors `0..n` in declaration order. Majors return to the registry on
//! detach and are reused. There is no state shared between registries.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use firesim_abi::layout::{FIRST_DYNAMIC_MAJOR, LAST_DYNAMIC_MAJOR};
use firesim_abi::{DeviceId, DeviceNumber};

use crate::channel::RegisterChannel;
use crate::description::HardwareDescription;
use crate::drivers::{AccessKind, DriverDescriptor};
use crate::error::DeviceError;
use crate::locator::ResourceLocator;
use crate::platform::{IoMapper, RegisterIo};
use crate::region::MappedRegion;

mod handle;
mod numbers;


pub use handle::{Backing, DeviceHandle, Session};
pub use numbers::MajorAllocator;

/// One attached device.
struct Attached {
    driver: &'static DriverDescriptor,
    id: DeviceId,
    handles: Vec<Arc<DeviceHandle>>,
}

/// A backing plus the register window it is bound to once attach commits.
type Built = (Backing, Option<Box<dyn RegisterIo>>);

struct RegistryState {
    majors: MajorAllocator,
    devices: Vec<Attached>,
}

/// Outcome of [`DeviceRegistry::probe`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// Drivers attached, with the device they created.
    pub attached: Vec<(&'static str, DeviceId)>,
    /// Drivers whose device was present but failed to attach.
    pub failed: Vec<(&'static str, DeviceError)>,
    /// Drivers whose device is not in the description.
    pub skipped: Vec<&'static str>,
}

impl ProbeReport {
    /// Whether no driver failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Owner of attached devices and their handles.
pub struct DeviceRegistry<M> {
    mapper: M,
    state: spin::Mutex<RegistryState>,
}

impl<M: IoMapper> DeviceRegistry<M> {
    /// An empty registry remapping channel registers through `mapper`.
    #[must_use]
    pub const fn new(mapper: M) -> Self {
        Self {
            mapper,
            state: spin::Mutex::new(RegistryState {
                majors: MajorAllocator::new(FIRST_DYNAMIC_MAJOR, LAST_DYNAMIC_MAJOR),
                devices: Vec::new(),
            }),
        }
    }

    /// The I/O mapper.
    #[must_use]
    pub const fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Attaches `driver`, resolving its resources in `description`.
    ///
    /// Returns the new handles in minor order.
    ///
    /// # Errors
    ///
    /// Nothing is bound on error.
    ///
    /// - [`DeviceError::Busy`] if the driver is already attached
    /// - [`DeviceError::MissingResource`] if an access point's resource is
    ///   absent from the description
    /// - [`DeviceError::MalformedDescription`] if a resource has no usable
    ///   register entry or a channel's registers do not fit it
    /// - [`DeviceError::IoRemap`] if a channel's registers cannot be remapped
    /// - [`DeviceError::NoDeviceNumbers`] if the major range is exhausted
    pub fn attach<D: HardwareDescription + ?Sized>(
        &self,
        driver: &'static DriverDescriptor,
        description: &D,
    ) -> Result<Vec<Arc<DeviceHandle>>, DeviceError> {
        self.attach_device(driver, description).map(|(_, handles)| handles)
    }

    /// Attaches `driver` and returns the device it was attached as.
    fn attach_device<D: HardwareDescription + ?Sized>(
        &self,
        driver: &'static DriverDescriptor,
        description: &D,
    ) -> Result<(DeviceId, Vec<Arc<DeviceHandle>>), DeviceError> {
        let mut state = self.state.lock();
        if state
            .devices
            .iter()
            .any(|d| d.driver.compatible == driver.compatible)
        {
            return Err(DeviceError::Busy);
        }

        let backings = self
            .build_backings(driver, &ResourceLocator::new(description))
            .inspect_err(|e| {
                tracing::error!(driver = driver.name, error = %e, "attach failed");
            })?;

        let Some(major) = state.majors.alloc() else {
            tracing::error!(driver = driver.name, "no major number available");
            return Err(DeviceError::NoDeviceNumbers);
        };
        let id = DeviceId::new(major);

        let mut handles = Vec::with_capacity(backings.len());
        for (minor, (spec, (backing, io))) in
            (0u32..).zip(driver.access_points.iter().zip(backings))
        {
            if let (Backing::Channel(channel), Some(io)) = (&backing, io) {
                channel.bind(io);
            }
            handles.push(Arc::new(DeviceHandle::new(
                spec.name,
                DeviceNumber::new(id, minor),
                backing,
            )));
        }

        state.devices.push(Attached {
            driver,
            id,
            handles: handles.clone(),
        });
        drop(state);

        tracing::info!(driver = driver.name, major, handles = handles.len(), "attached");
        Ok((id, handles))
    }

    /// Resolves and constructs every backing of `driver` without binding.
    fn build_backings<D: HardwareDescription + ?Sized>(
        &self,
        driver: &'static DriverDescriptor,
        locator: &ResourceLocator<'_, D>,
    ) -> Result<Vec<Built>, DeviceError> {
        let resources = driver
            .access_points
            .iter()
            .map(|spec| locator.require(spec.key))
            .collect::<Result<Vec<_>, _>>()?;

        let mut backings = Vec::with_capacity(resources.len());
        for (spec, resource) in driver.access_points.iter().zip(resources) {
            let built = match spec.kind {
                AccessKind::Channel { request, response } => {
                    let channel = RegisterChannel::new(resource, request, response)?;
                    let io = self.mapper.ioremap(channel.resource()).map_err(|e| {
                        tracing::error!(
                            key = spec.key,
                            base = %channel.resource().base(),
                            error = %e,
                            "could not remap registers"
                        );
                        DeviceError::IoRemap(e)
                    })?;
                    (Backing::Channel(channel), Some(io))
                }
                AccessKind::Region => (Backing::Region(MappedRegion::new(resource)), None),
            };
            backings.push(built);
        }
        Ok(backings)
    }

    /// Attaches every driver in `drivers` whose device is in `description`.
    ///
    /// Failures are logged and collected; probing carries on with the next
    /// driver.
    pub fn probe<D: HardwareDescription + ?Sized>(
        &self,
        description: &D,
        drivers: &[&'static DriverDescriptor],
    ) -> ProbeReport {
        let locator = ResourceLocator::new(description);
        let mut report = ProbeReport::default();
        for &driver in drivers {
            if !locator.contains(driver.compatible) {
                tracing::debug!(driver = driver.name, key = driver.compatible, "device not present");
                report.skipped.push(driver.name);
                continue;
            }
            match self.attach_device(driver, description) {
                Ok((id, _)) => report.attached.push((driver.name, id)),
                Err(e) => report.failed.push((driver.name, e)),
            }
        }
        report
    }

    /// Opens the handle named `name`.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotFound`] if no attached device has such a handle.
    pub fn open(&self, name: &str) -> Result<Session, DeviceError> {
        self.find_handle(|h| h.name() == name)?.open()
    }

    /// Opens the handle with device number `number`.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotFound`] if no attached device has such a handle.
    pub fn open_number(&self, number: DeviceNumber) -> Result<Session, DeviceError> {
        self.find_handle(|h| h.number() == number)?.open()
    }

    fn find_handle(
        &self,
        pred: impl Fn(&DeviceHandle) -> bool,
    ) -> Result<Arc<DeviceHandle>, DeviceError> {
        let state = self.state.lock();
        state
            .devices
            .iter()
            .flat_map(|d| d.handles.iter())
            .find(|h| pred(h))
            .cloned()
            .ok_or(DeviceError::NotFound)
    }

    /// Detaches device `id`.
    ///
    /// Waits for operations in flight on its handles. Sessions that stay
    /// open fail every later operation with [`DeviceError::Gone`].
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotFound`] if no device with this id is attached.
    pub fn detach(&self, id: DeviceId) -> Result<(), DeviceError> {
        let device = {
            let mut state = self.state.lock();
            let index = state
                .devices
                .iter()
                .position(|d| d.id == id)
                .ok_or(DeviceError::NotFound)?;
            state.devices.remove(index)
        };

        for handle in &device.handles {
            let open = handle.retire();
            if open > 0 {
                tracing::warn!(
                    driver = device.driver.name,
                    handle = handle.name(),
                    sessions = open,
                    "detaching with open sessions"
                );
            }
        }

        self.state.lock().majors.release(id.major());
        tracing::info!(driver = device.driver.name, major = id.major(), "detached");
        Ok(())
    }

    /// Detaches every device, most recently attached first.
    pub fn detach_all(&self) {
        loop {
            let last = self.state.lock().devices.last().map(|d| d.id);
            match last {
                Some(id) => match self.detach(id) {
                    // Detached concurrently.
                    Ok(()) | Err(DeviceError::NotFound) => {}
                    Err(e) => {
                        tracing::error!(major = id.major(), error = %e, "detach failed");
                    }
                },
                None => break,
            }
        }
    }

    /// The device `driver` is attached as, if any.
    #[must_use]
    pub fn device_of(&self, driver: &DriverDescriptor) -> Option<DeviceId> {
        self.state
            .lock()
            .devices
            .iter()
            .find(|d| d.driver.compatible == driver.compatible)
            .map(|d| d.id)
    }

    /// All live handles, in attach then minor order.
    #[must_use]
    pub fn handles(&self) -> Vec<Arc<DeviceHandle>> {
        self.state
            .lock()
            .devices
            .iter()
            .flat_map(|d| d.handles.iter().cloned())
            .collect()
    }

    /// Number of attached devices.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.state.lock().devices.len()
    }
}

impl<M> core::fmt::Debug for DeviceRegistry<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("DeviceRegistry")
            .field("devices", &state.devices.len())
            .field("majors_remaining", &state.majors.remaining())
            .finish_non_exhaustive()
    }
}
