/*!

## About

`alloc_policies`: composable memory allocator policies.

This crate is a small library of policy-oriented allocators that an
application assembles to control how it acquires and releases raw storage,
instead of always going through the general-purpose heap. Each policy —
inline, stack, page, fallback, global — satisfies the same four-method
contract ([`AllocatorPolicy`]) so that they compose: a [`FallbackAllocator`]
sequences two policies so that failure of the primary transparently
dispatches to the secondary, and [`GlobalAsFallback`] gives any bounded
policy an escape hatch to the host heap.

- **`InlineAllocator<N, T>`**: a bounded arena of `N` slots of `T`, embedded
  directly in the instance. No allocation happens at construction.
- **`StackAllocator`**: a bump allocator over a single fixed backing buffer.
  Deallocation must occur in exact reverse order of allocation.
- **`PageAllocator`**: a grow-only list of fixed-size-slot pages, recycling
  freed slots through an intrusive free list threaded through the slots
  themselves.
- **`FallbackAllocator<Primary, Fallback>`**: sequences two allocators.
- **`GlobalAllocator<T>`**: forwards to the host process's heap; the
  universal terminal fallback.
- Debug decorators (`debug` feature): `DebugStackAllocator`,
  `DebugPageAllocator`, `DebugInlineAllocator` stamp memory with recognizable
  byte patterns at lifecycle transitions and accumulate per-instance
  statistics.

## `cargo` features

- **std**: on by default. Enables the default out-of-memory callback
  (reports to stderr before retrying). Without it, allocation failures retry
  once in silence before propagating to the host's native failure mechanism.
- **debug**: enables the decorator types and the `massert!`
  contract-violation assertions (LIFO order, double free, unowned
  deallocate).
- **debug_patterns**: independent of `debug`. Stamps memory with the
  documented byte patterns at each lifecycle transition. Large runtime
  overhead; off by default.

## Non-goals

Thread safety (no allocator here synchronizes concurrent access to a single
instance), alignment beyond the natural alignment of the slot type,
general-size allocation from the page allocator, compaction, arena reset for
the page allocator, and garbage collection.

 */

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

extern crate alloc as alloc_crate;

#[macro_use]
mod assert;

mod chunk;
mod fallback;
mod global;
mod heap;
mod inline;
mod oom;
mod page;
mod stack;
mod units;

#[cfg(feature = "debug")]
pub mod debug;

pub use crate::chunk::MemoryChunk;
pub use crate::fallback::{DefaultInlineAllocator, FallbackAllocator, GlobalAsFallback};
pub use crate::global::GlobalAllocator;
pub use crate::inline::InlineAllocator;
pub use crate::oom::{get_out_of_memory_callback, set_out_of_memory_callback, OutOfMemoryCallback};
pub use crate::page::PageAllocator;
pub use crate::stack::StackAllocator;
pub use crate::units::{kilobyte_to_byte, megabyte_to_byte};

use core::ptr::NonNull;

/// The contract every allocator policy in this crate satisfies.
///
/// `allocate`/`deallocate` pairs must nest: a returned address is owned by
/// whichever policy produced it for the interval between `allocate` and the
/// matching `deallocate`. Combinators (like [`FallbackAllocator`]) own
/// nothing themselves; they just route to the leaf that does.
pub trait AllocatorPolicy<T> {
    /// Returns an address to at least `n` contiguous `T`s, or `None` if this
    /// policy cannot satisfy the request locally.
    fn allocate(&self, n: usize) -> Option<NonNull<T>>;

    /// Releases a region previously returned by `allocate(n)` on this same
    /// policy. Calling this with a pointer this policy does not [`owns`]
    /// is a contract violation.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by a live call to `self.allocate(n)`
    /// that has not yet been released.
    ///
    /// [`owns`]: AllocatorPolicy::owns
    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize);

    /// Whether `ptr` was returned by a still-live call to `self.allocate`.
    fn owns(&self, ptr: *const T) -> bool;

    /// Whether this policy cannot satisfy any further allocation.
    fn is_full(&self) -> bool;

    /// The number of bytes this policy can still serve, best-case.
    fn free_size(&self) -> usize;
}
