//! `DebugStackAllocator`: a drop-in stand-in for [`crate::StackAllocator`]
//! that also stamps byte patterns and records per-allocation statistics.

use super::pattern::{self, FREED, LIVE, RELEASED, RESERVED};
use crate::stack::StackAllocator;
use crate::AllocatorPolicy;
use alloc_crate::vec::Vec;
use core::cell::{Cell, RefCell};
use core::ptr::NonNull;

/// Counters and per-call history accumulated by a [`DebugStackAllocator`].
#[derive(Default)]
pub struct StackStats {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    failures: Cell<usize>,
    per_allocation: RefCell<Vec<(usize, usize)>>,
}

impl StackStats {
    /// Total successful `allocate` calls.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Total `deallocate` calls.
    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    /// Total `allocate` calls that returned `None`.
    pub fn failures(&self) -> usize {
        self.failures.get()
    }

    /// `(size, offset_from_base)` for every successful allocation, in the
    /// order they occurred.
    pub fn per_allocation(&self) -> Vec<(usize, usize)> {
        self.per_allocation.borrow().clone()
    }
}

/// [`crate::StackAllocator`] plus byte-pattern stamping and statistics.
///
/// The whole arena is stamped [`pattern::RESERVED`] at construction, each
/// returned region is stamped [`pattern::LIVE`] on `allocate` and
/// [`pattern::FREED`] on `deallocate`, and the whole arena is stamped
/// [`pattern::RELEASED`] just before the backing chunk is released.
pub struct DebugStackAllocator {
    inner: StackAllocator,
    stats: StackStats,
}

impl DebugStackAllocator {
    /// Acquires `bytes` from the terminal heap, as [`StackAllocator::new`].
    pub fn new(bytes: usize) -> Self {
        let inner = StackAllocator::new(bytes);
        let chunk = inner.chunk();
        unsafe { pattern::stamp(chunk.base().as_ptr(), chunk.size(), RESERVED) };
        DebugStackAllocator {
            inner,
            stats: StackStats::default(),
        }
    }

    /// The accumulated statistics for this instance.
    pub fn get_stats(&self) -> &StackStats {
        &self.stats
    }
}

impl AllocatorPolicy<u8> for DebugStackAllocator {
    fn allocate(&self, n: usize) -> Option<NonNull<u8>> {
        match self.inner.allocate(n) {
            Some(p) => {
                unsafe { pattern::stamp(p.as_ptr(), n, LIVE) };
                self.stats.allocations.set(self.stats.allocations.get() + 1);
                let offset = self.inner.offset_from_base(p.as_ptr());
                self.stats.per_allocation.borrow_mut().push((n, offset));
                Some(p)
            }
            None => {
                self.stats.failures.set(self.stats.failures.get() + 1);
                None
            }
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, n: usize) {
        pattern::stamp(ptr.as_ptr(), n, FREED);
        self.stats.deallocations.set(self.stats.deallocations.get() + 1);
        self.inner.deallocate(ptr, n);
    }

    fn owns(&self, ptr: *const u8) -> bool {
        self.inner.owns(ptr)
    }

    fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    fn free_size(&self) -> usize {
        self.inner.free_size()
    }
}

impl Drop for DebugStackAllocator {
    fn drop(&mut self) {
        let chunk = self.inner.chunk();
        unsafe { pattern::stamp(chunk.base().as_ptr(), chunk.size(), RELEASED) };
    }
}
