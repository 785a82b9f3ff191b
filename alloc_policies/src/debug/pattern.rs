//! Spec section 4.7: byte patterns stamped at each lifecycle transition.
//! Stamping itself is gated independently behind the `debug_patterns`
//! feature, since it is a real runtime cost — the decorators that call
//! `stamp` stay compiled in under plain `debug` regardless.

/// Freshly acquired from upstream, not yet handed to a caller.
pub const RESERVED: u8 = 0xCC;
/// Handed to a caller by `allocate`.
pub const LIVE: u8 = 0xAA;
/// Handed back via `deallocate`.
pub const FREED: u8 = 0xDD;
/// Released to upstream, or the owning allocator fell out of scope.
pub const RELEASED: u8 = 0xFF;
/// Reserved for padding between allocations; no policy in this crate
/// currently introduces such padding, but the byte is part of the
/// documented palette.
#[allow(dead_code)]
pub const PADDING: u8 = 0xBB;

#[cfg(feature = "debug_patterns")]
pub(crate) unsafe fn stamp(ptr: *mut u8, len: usize, byte: u8) {
    core::ptr::write_bytes(ptr, byte, len);
}

#[cfg(not(feature = "debug_patterns"))]
pub(crate) unsafe fn stamp(_ptr: *mut u8, _len: usize, _byte: u8) {}
