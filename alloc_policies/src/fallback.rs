//! Spec section 4.6: sequences two allocator policies so that exhaustion of
//! the primary transparently falls through to the secondary.

use crate::global::GlobalAllocator;
use crate::inline::InlineAllocator;
use crate::AllocatorPolicy;
use core::ptr::NonNull;

/// Tries `Primary` first; on failure, tries `Fallback`. `deallocate` and
/// `owns` route to whichever of the two actually owns the pointer, so the
/// caller never needs to remember which one served a given allocation.
pub struct FallbackAllocator<Primary, Fallback> {
    primary: Primary,
    fallback: Fallback,
}

impl<Primary, Fallback> FallbackAllocator<Primary, Fallback> {
    /// Composes `primary` and `fallback` into a single policy that prefers
    /// `primary`.
    pub fn new(primary: Primary, fallback: Fallback) -> Self {
        FallbackAllocator { primary, fallback }
    }

    /// The primary policy, for inspection (e.g. `is_full`) without routing
    /// through the combined contract.
    pub fn primary(&self) -> &Primary {
        &self.primary
    }

    /// The fallback policy, for inspection.
    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }
}

impl<T, Primary, Fallback> AllocatorPolicy<T> for FallbackAllocator<Primary, Fallback>
where
    Primary: AllocatorPolicy<T>,
    Fallback: AllocatorPolicy<T>,
{
    fn allocate(&self, n: usize) -> Option<NonNull<T>> {
        self.primary.allocate(n).or_else(|| self.fallback.allocate(n))
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        if self.primary.owns(ptr.as_ptr()) {
            self.primary.deallocate(ptr, n);
        } else {
            massert!(self.fallback.owns(ptr.as_ptr()));
            self.fallback.deallocate(ptr, n);
        }
    }

    fn owns(&self, ptr: *const T) -> bool {
        self.primary.owns(ptr) || self.fallback.owns(ptr)
    }

    fn is_full(&self) -> bool {
        self.primary.is_full() && self.fallback.is_full()
    }

    fn free_size(&self) -> usize {
        // Best-case, not sum: a single allocation is served by whichever
        // side can fit it, never split across both.
        self.primary.free_size().max(self.fallback.free_size())
    }
}

/// An `N`-slot inline pool backed by the host heap once it fills up — the
/// combination spec section 6 calls out as the common case.
pub type DefaultInlineAllocator<const N: usize, T> =
    FallbackAllocator<InlineAllocator<N, T>, GlobalAllocator<T>>;

/// Gives any bounded policy an escape hatch to the host heap.
pub type GlobalAsFallback<A, T> = FallbackAllocator<A, GlobalAllocator<T>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::StackAllocator;

    #[test]
    fn scenario_from_spec() {
        let pool: DefaultInlineAllocator<2, i32> =
            FallbackAllocator::new(InlineAllocator::new(), GlobalAllocator::new());

        let a = pool.allocate(1).unwrap();
        let b = pool.allocate(1).unwrap();
        assert!(pool.primary().is_full());

        // Primary is full; this one must come from the fallback.
        let c = pool.allocate(1).unwrap();
        assert!(pool.fallback().owns(c.as_ptr()));
        assert!(!pool.primary().owns(c.as_ptr()));

        unsafe {
            pool.deallocate(a, 1);
            pool.deallocate(b, 1);
            pool.deallocate(c, 1);
        }
    }

    #[test]
    fn owns_and_deallocate_route_to_the_side_that_actually_served_it() {
        let pool: GlobalAsFallback<StackAllocator, u8> =
            FallbackAllocator::new(StackAllocator::new(4), GlobalAllocator::new());

        let a = pool.allocate(4).unwrap();
        assert!(pool.primary().owns(a.as_ptr()));

        let b = pool.allocate(1).unwrap();
        assert!(!pool.primary().owns(b.as_ptr()));
        assert!(pool.fallback().owns(b.as_ptr()));

        unsafe {
            pool.deallocate(b, 1);
            pool.deallocate(a, 4);
        }
    }

    #[test]
    fn is_full_requires_both_sides_exhausted() {
        let pool: DefaultInlineAllocator<1, i32> =
            FallbackAllocator::new(InlineAllocator::new(), GlobalAllocator::new());
        pool.allocate(1).unwrap();
        assert!(pool.primary().is_full());
        assert!(!pool.is_full(), "the global fallback never reports full");
    }
}
