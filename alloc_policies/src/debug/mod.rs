//! Spec section 4.7: decorators that wrap the stack, page and inline
//! allocators without changing their contract, adding byte-pattern
//! stamping and per-instance statistics. Gated behind the `debug` feature.

pub mod pattern;

mod inline;
mod page;
mod stack;

pub use inline::{DebugInlineAllocator, InlineStats};
pub use page::{DebugPageAllocator, PageStats};
pub use stack::{DebugStackAllocator, StackStats};
