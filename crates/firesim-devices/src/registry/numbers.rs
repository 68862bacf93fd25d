// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Major number allocator.
//!
//! Each registry hands out majors from a fixed range. Majors are allocated
//! sequentially until the range runs out; released majors are kept in a free
//! set and reused lowest first.

use alloc::collections::BTreeSet;

/// Allocator for device major numbers.
pub struct MajorAllocator {
    /// First valid major.
    first: u32,
    /// Next never-used major.
    next: u32,
    /// One past the last valid major.
    end: u32,
    /// Released majors below `next`.
    free: BTreeSet<u32>,
}

impl MajorAllocator {
    /// Creates an allocator for `first..=last`.
    #[must_use]
    pub const fn new(first: u32, last: u32) -> Self {
        Self {
            first,
            next: first,
            end: last.saturating_add(1),
            free: BTreeSet::new(),
        }
    }

    /// Allocates a major.
    ///
    /// # Returns
    ///
    /// The major, or `None` if every major in the range is in use.
    pub fn alloc(&mut self) -> Option<u32> {
        if let Some(major) = self.free.pop_first() {
            return Some(major);
        }
        if self.next < self.end {
            let major = self.next;
            self.next += 1;
            Some(major)
        } else {
            None
        }
    }

    /// Returns `major` to the allocator.
    ///
    /// Returns `false` if `major` was not allocated.
    pub fn release(&mut self, major: u32) -> bool {
        if major < self.first || major >= self.next || major >= self.end {
            return false;
        }
        self.free.insert(major)
    }

    /// Returns the number of majors still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        (self.end.saturating_sub(self.next) as usize) + self.free.len()
    }

    /// Returns true if no majors remain.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_then_exhausted() {
        let mut majors = MajorAllocator::new(10, 12);
        assert_eq!(majors.remaining(), 3);
        assert_eq!(majors.alloc(), Some(10));
        assert_eq!(majors.alloc(), Some(11));
        assert_eq!(majors.alloc(), Some(12));
        assert_eq!(majors.alloc(), None);
        assert!(majors.is_exhausted());
    }

    #[test]
    fn released_majors_are_reused_lowest_first() {
        let mut majors = MajorAllocator::new(10, 14);
        for _ in 0..4 {
            let _ = majors.alloc();
        }
        assert!(majors.release(12));
        assert!(majors.release(11));
        assert_eq!(majors.remaining(), 3);
        assert_eq!(majors.alloc(), Some(11));
        assert_eq!(majors.alloc(), Some(12));
        assert_eq!(majors.alloc(), Some(14));
    }

    #[test]
    fn release_rejects_unallocated() {
        let mut majors = MajorAllocator::new(10, 12);
        assert!(!majors.release(10));
        assert_eq!(majors.alloc(), Some(10));
        assert!(majors.release(10));
        assert!(!majors.release(10));
        assert!(!majors.release(9));
        assert!(!majors.release(200));
    }

    #[test]
    fn release_below_range_is_not_handed_out() {
        let mut majors = MajorAllocator::new(234, 254);
        assert_eq!(majors.alloc(), Some(234));
        assert!(!majors.release(3));
        assert!(!majors.release(233));
        assert_eq!(majors.remaining(), 20);
        assert_eq!(majors.alloc(), Some(235));
    }

    #[test]
    fn full_dynamic_range() {
        use firesim_abi::layout::{FIRST_DYNAMIC_MAJOR, LAST_DYNAMIC_MAJOR};

        let mut majors = MajorAllocator::new(FIRST_DYNAMIC_MAJOR, LAST_DYNAMIC_MAJOR);
        assert_eq!(majors.remaining(), 21);
        assert_eq!(majors.alloc(), Some(234));
    }
}
