//! A debug decorator over the common `Fallback<Inline<N, T>, Fallback>`
//! composition, tracking how often the inline pool itself was enough.
//!
//! Unlike [`super::stack::DebugStackAllocator`] and
//! [`super::page::DebugPageAllocator`], this decorator's statistics are not
//! owned by the instance: they are published to an external
//! [`InlineStats`] record supplied at construction, so every instance built
//! at the same call site (e.g. inside a loop, or across repeated
//! constructions of a short-lived value) aggregates into one record.

use crate::fallback::FallbackAllocator;
use crate::inline::InlineAllocator;
use crate::AllocatorPolicy;
use core::cell::Cell;
use core::ptr::NonNull;

/// A record multiple [`DebugInlineAllocator`] instances can share.
#[derive(Default)]
pub struct InlineStats {
    use_num: Cell<usize>,
    allocation_num: Cell<usize>,
    total_alloc_objects: Cell<usize>,
    non_inline_allocs: Cell<usize>,
    uses_implying_non_inline_allocs: Cell<usize>,
}

impl InlineStats {
    /// Times an instance was constructed against this record.
    pub fn use_num(&self) -> usize {
        self.use_num.get()
    }

    /// Total `allocate` calls across every instance sharing this record.
    pub fn allocation_num(&self) -> usize {
        self.allocation_num.get()
    }

    /// Total objects successfully allocated (summed `n`) across every
    /// instance sharing this record.
    pub fn total_alloc_objects(&self) -> usize {
        self.total_alloc_objects.get()
    }

    /// `allocate` calls that the inline pool itself could not satisfy and
    /// that fell through to the fallback.
    pub fn non_inline_allocs(&self) -> usize {
        self.non_inline_allocs.get()
    }

    /// Instances in which at least one allocation fell through to the
    /// fallback.
    pub fn uses_implying_non_inline_allocs(&self) -> usize {
        self.uses_implying_non_inline_allocs.get()
    }
}

/// An `N`-slot inline pool, falling back to `Fallback`, reporting into a
/// shared [`InlineStats`] record.
pub struct DebugInlineAllocator<'s, const N: usize, T, Fallback> {
    inner: FallbackAllocator<InlineAllocator<N, T>, Fallback>,
    stats: &'s InlineStats,
    had_non_inline: Cell<bool>,
}

impl<'s, const N: usize, T, Fallback> DebugInlineAllocator<'s, N, T, Fallback> {
    /// Creates a new instance, recording its construction against `stats`.
    pub fn new(fallback: Fallback, stats: &'s InlineStats) -> Self {
        stats.use_num.set(stats.use_num.get() + 1);
        DebugInlineAllocator {
            inner: FallbackAllocator::new(InlineAllocator::new(), fallback),
            stats,
            had_non_inline: Cell::new(false),
        }
    }

    /// The shared statistics record this instance reports into.
    pub fn get_stats(&self) -> &InlineStats {
        self.stats
    }
}

impl<'s, const N: usize, T, Fallback> AllocatorPolicy<T> for DebugInlineAllocator<'s, N, T, Fallback>
where
    Fallback: AllocatorPolicy<T>,
{
    fn allocate(&self, n: usize) -> Option<NonNull<T>> {
        self.stats.allocation_num.set(self.stats.allocation_num.get() + 1);

        let result = match self.inner.primary().allocate(n) {
            Some(p) => Some(p),
            None => {
                self.stats.non_inline_allocs.set(self.stats.non_inline_allocs.get() + 1);
                if !self.had_non_inline.get() {
                    self.had_non_inline.set(true);
                    self.stats
                        .uses_implying_non_inline_allocs
                        .set(self.stats.uses_implying_non_inline_allocs.get() + 1);
                }
                self.inner.fallback().allocate(n)
            }
        };

        if result.is_some() {
            self.stats
                .total_alloc_objects
                .set(self.stats.total_alloc_objects.get() + n);
        }
        result
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        self.inner.deallocate(ptr, n);
    }

    fn owns(&self, ptr: *const T) -> bool {
        self.inner.owns(ptr)
    }

    fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    fn free_size(&self) -> usize {
        self.inner.free_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global::GlobalAllocator;

    #[test]
    fn tracks_fall_through_to_the_fallback_once_per_instance() {
        let stats = InlineStats::default();

        {
            let pool: DebugInlineAllocator<2, i32, GlobalAllocator<i32>> =
                DebugInlineAllocator::new(GlobalAllocator::new(), &stats);
            let a = pool.allocate(1).unwrap();
            let b = pool.allocate(1).unwrap();
            let c = pool.allocate(1).unwrap(); // inline pool is full, falls through
            let d = pool.allocate(1).unwrap(); // already fell through once

            unsafe {
                pool.deallocate(a, 1);
                pool.deallocate(b, 1);
                pool.deallocate(c, 1);
                pool.deallocate(d, 1);
            }
        }

        assert_eq!(stats.use_num(), 1);
        assert_eq!(stats.allocation_num(), 4);
        assert_eq!(stats.total_alloc_objects(), 4);
        assert_eq!(stats.non_inline_allocs(), 2);
        assert_eq!(stats.uses_implying_non_inline_allocs(), 1);
    }

    #[test]
    fn aggregates_across_multiple_instances_at_the_same_call_site() {
        let stats = InlineStats::default();

        for _ in 0..3 {
            let pool: DebugInlineAllocator<1, i32, GlobalAllocator<i32>> =
                DebugInlineAllocator::new(GlobalAllocator::new(), &stats);
            let p = pool.allocate(1).unwrap();
            unsafe { pool.deallocate(p, 1) };
        }

        assert_eq!(stats.use_num(), 3);
        assert_eq!(stats.uses_implying_non_inline_allocs(), 0);
    }
}
