// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Consumer-visible error codes.
//!
//! Drivers report failures to consumers as Linux errno values. Only the codes
//! the drivers actually produce are listed.

use core::fmt;

/// A Linux errno value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
#[allow(clippy::upper_case_acronyms)]
pub enum Errno {
    /// No such file or directory (unknown access point).
    ENOENT = 2,
    /// I/O error (mapping could not be established).
    EIO = 5,
    /// Bad address (consumer buffer not accessible).
    EFAULT = 14,
    /// Device or resource busy.
    EBUSY = 16,
    /// No such device (device absent, detached, or not ready).
    ENODEV = 19,
    /// Invalid argument.
    EINVAL = 22,
}

impl Errno {
    /// The positive errno value.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// The negative value a syscall handler returns.
    #[inline]
    #[must_use]
    pub const fn as_return(self) -> isize {
        -(self as isize)
    }

    /// Try to convert from a positive errno value.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            2 => Some(Self::ENOENT),
            5 => Some(Self::EIO),
            14 => Some(Self::EFAULT),
            16 => Some(Self::EBUSY),
            19 => Some(Self::ENODEV),
            22 => Some(Self::EINVAL),
            _ => None,
        }
    }

    /// Symbolic name of the code.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ENOENT => "ENOENT",
            Self::EIO => "EIO",
            Self::EFAULT => "EFAULT",
            Self::EBUSY => "EBUSY",
            Self::ENODEV => "ENODEV",
            Self::EINVAL => "EINVAL",
        }
    }
}

impl fmt::Debug for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.code())
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_code() {
        for errno in [
            Errno::ENOENT,
            Errno::EIO,
            Errno::EFAULT,
            Errno::EBUSY,
            Errno::ENODEV,
            Errno::EINVAL,
        ] {
            assert_eq!(Errno::from_code(errno.code()), Some(errno));
        }
        assert_eq!(Errno::from_code(0), None);
    }

    #[test]
    fn syscall_return_is_negative() {
        assert_eq!(Errno::EINVAL.as_return(), -22);
        assert_eq!(Errno::EFAULT.as_return(), -14);
    }

    #[test]
    fn debug_shows_name_and_code() {
        assert_eq!(format!("{:?}", Errno::ENODEV), "ENODEV(19)");
        assert_eq!(format!("{}", Errno::ENODEV), "ENODEV");
    }
}
