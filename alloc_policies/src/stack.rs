//! Spec section 4.3: a bump allocator over a single fixed backing buffer.
//! Cheapest possible allocator for strictly-scoped regions (per-frame
//! scratch, say). Release must happen in exact reverse order of
//! allocation — non-LIFO release is not supported, by design; that
//! complexity belongs to the inline or page allocator instead.

use crate::chunk::MemoryChunk;
use crate::AllocatorPolicy;
use core::cell::Cell;
use core::ptr::NonNull;

/// Bumps a `top` cursor forward on `allocate`, and rewinds it on
/// `deallocate` — but only if the caller released in the exact reverse
/// order it allocated in. Violating that precondition is a fatal
/// programming error, not a recoverable one (checked only when the `debug`
/// feature is enabled; deallocate is O(1) and unchecked otherwise, per the
/// source).
pub struct StackAllocator {
    chunk: MemoryChunk,
    top: Cell<*mut u8>,
}

impl StackAllocator {
    /// Acquires `bytes` from the terminal heap to serve as this stack's
    /// arena.
    pub fn new(bytes: usize) -> Self {
        let chunk = MemoryChunk::new(bytes);
        let top = Cell::new(chunk.base().as_ptr());
        StackAllocator { chunk, top }
    }

    #[cfg_attr(not(feature = "debug"), allow(dead_code))]
    pub(crate) fn offset_from_base(&self, ptr: *const u8) -> usize {
        (ptr as usize) - (self.chunk.base().as_ptr() as usize)
    }

    #[cfg_attr(not(feature = "debug"), allow(dead_code))]
    pub(crate) fn chunk(&self) -> &MemoryChunk {
        &self.chunk
    }
}

impl AllocatorPolicy<u8> for StackAllocator {
    fn allocate(&self, n: usize) -> Option<NonNull<u8>> {
        if n > self.free_size() {
            return None;
        }

        let result = self.top.get();
        self.top.set(unsafe { result.add(n) });
        NonNull::new(result)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, n: usize) {
        massert!(ptr.as_ptr() == self.top.get().sub(n));
        self.top.set(ptr.as_ptr());
    }

    fn owns(&self, ptr: *const u8) -> bool {
        self.chunk.owns(ptr)
    }

    fn is_full(&self) -> bool {
        self.free_size() == 0
    }

    fn free_size(&self) -> usize {
        (self.chunk.end() as usize) - (self.top.get() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_from_spec() {
        let s = StackAllocator::new(16);
        assert_eq!(s.free_size(), 16);

        let a = s.allocate(5).unwrap();
        assert_eq!(s.free_size(), 11);
        assert!(!s.is_full());

        let b = s.allocate(6).unwrap();
        assert_eq!(s.free_size(), 5);
        assert!(!s.is_full());

        unsafe { s.deallocate(b, 6) };
        assert_eq!(s.free_size(), 11);

        unsafe { s.deallocate(a, 5) };
        assert_eq!(s.free_size(), 16);
        assert!(!s.is_full());
    }

    #[test]
    fn allocate_more_than_capacity_fails_and_is_noop() {
        let s = StackAllocator::new(16);
        assert!(s.allocate(17).is_none());
        assert_eq!(s.free_size(), 16);
    }

    #[test]
    fn balanced_lifo_sequence_restores_state() {
        let s = StackAllocator::new(64);
        let a = s.allocate(10).unwrap();
        let b = s.allocate(20).unwrap();
        let c = s.allocate(5).unwrap();

        unsafe {
            s.deallocate(c, 5);
            s.deallocate(b, 20);
            s.deallocate(a, 10);
        }

        assert_eq!(s.free_size(), 64);
        assert_eq!(s.top.get(), s.chunk.base().as_ptr());
    }

    #[test]
    fn owns_only_addresses_inside_the_arena() {
        let s = StackAllocator::new(8);
        let a = s.allocate(8).unwrap();
        assert!(s.owns(a.as_ptr()));
        assert!(!s.owns(core::ptr::null()));
    }

    #[test]
    fn offset_from_base_matches_allocation_order() {
        let s = StackAllocator::new(16);
        let a = s.allocate(4).unwrap();
        assert_eq!(s.offset_from_base(a.as_ptr()), 0);
        let b = s.allocate(4).unwrap();
        assert_eq!(s.offset_from_base(b.as_ptr()), 4);
    }
}
