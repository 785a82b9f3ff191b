//! The terminal heap: the host process's general-purpose allocator. Every
//! other policy in this crate eventually bottoms out here, whether directly
//! ([`crate::chunk::MemoryChunk`], [`crate::global::GlobalAllocator`]) or
//! through growing a page ([`crate::page::PageAllocator`]).
//!
//! Failure is intercepted, routed to the process-wide out-of-memory
//! callback, and retried exactly once (spec section 4.8 / 7.3). If the
//! retry also fails, we propagate to the host's native failure mechanism via
//! [`alloc_crate::alloc::handle_alloc_error`].

use crate::oom::notify_out_of_memory;
use alloc_crate::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::ptr::NonNull;

pub(crate) fn terminal_alloc(layout: Layout) -> NonNull<u8> {
    let first = unsafe { alloc(layout) };
    if let Some(ptr) = NonNull::new(first) {
        return ptr;
    }

    notify_out_of_memory();

    let retried = unsafe { alloc(layout) };
    match NonNull::new(retried) {
        Some(ptr) => ptr,
        None => handle_alloc_error(layout),
    }
}

/// # Safety
///
/// `ptr` must have been returned by `terminal_alloc` with an identical
/// `layout`.
pub(crate) unsafe fn terminal_dealloc(ptr: NonNull<u8>, layout: Layout) {
    dealloc(ptr.as_ptr(), layout);
}
