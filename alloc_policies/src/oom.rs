//! The process-wide out-of-memory callback (spec section 4.8). The
//! terminal heap wrapper ([`crate::global`]) invokes this when the host
//! heap fails, then retries the allocation exactly once.
//!
//! This is process-wide mutable state with init-on-first-use semantics, so
//! it lives behind a `spin::Mutex` even though the rest of this crate has no
//! internal synchronization: installation may race with another thread's
//! allocation (spec section 9, "Global callback").

use spin::Mutex;

/// Signature of the out-of-memory callback: takes no arguments, returns
/// nothing, and is expected to free up some memory before returning.
pub type OutOfMemoryCallback = fn();

static CALLBACK: Mutex<Option<OutOfMemoryCallback>> = Mutex::new(None);

/// Returns the currently installed out-of-memory callback, or the default
/// one if none has been installed.
pub fn get_out_of_memory_callback() -> OutOfMemoryCallback {
    CALLBACK.lock().unwrap_or(default_out_of_memory_callback)
}

/// Installs a new out-of-memory callback. Passing `None` reinstalls the
/// default callback.
pub fn set_out_of_memory_callback(callback: Option<OutOfMemoryCallback>) {
    *CALLBACK.lock() = callback;
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        fn default_out_of_memory_callback() {
            use std::io::Write;
            let _ = writeln!(std::io::stderr(), "alloc_policies: out of memory");
        }
    } else {
        fn default_out_of_memory_callback() {}
    }
}

pub(crate) fn notify_out_of_memory() {
    (get_out_of_memory_callback())();
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    fn bump() {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn install_and_restore_default() {
        set_out_of_memory_callback(Some(bump));
        notify_out_of_memory();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);

        set_out_of_memory_callback(None);
        assert_eq!(
            get_out_of_memory_callback() as *const (),
            default_out_of_memory_callback as *const ()
        );
    }
}
