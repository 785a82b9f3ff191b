//! Contract-violation assertions: LIFO order broken, double free, unowned
//! deallocate, corrupted free list. These are fatal, not recoverable (see
//! spec section 7 category 2) and are only checked when the `debug` feature
//! is enabled, mirroring the source's `MEMORY_ASSERT`/`MEMORY_DEBUG_ENABLED`.

#[cfg(feature = "debug")]
macro_rules! massert {
    ( $condition:expr $( , $args:tt )* ) => {
        assert!($condition $( , $args )* )
    };
}

#[cfg(not(feature = "debug"))]
macro_rules! massert {
    ( $condition:expr $( , $args:tt )* ) => {
        if false {
            let _ = $condition;
        }
    };
}
