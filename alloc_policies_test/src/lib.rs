//! An arbitrary-operation-sequence harness for property-testing allocator
//! policies, grounded in the one in use at this crate's sibling `tests/`
//! workspace position: a weighted mix of allocate and free, applied against
//! a real policy and checked against its documented contract after every
//! step.

use quickcheck::{Arbitrary, Gen};

/// One step of an operation sequence against an allocator policy.
#[derive(Clone, Copy, Debug)]
pub enum Operation {
    /// Allocate this many elements.
    Alloc(usize),
    /// Free the operation-order-th still-live allocation, if one exists by
    /// that index at replay time.
    Free(usize),
}

/// A sequence of [`Operation`]s, weighted so that frees become more likely
/// as more allocations are outstanding — this exercises recycling (the
/// inline bitmap's skip-rule scan, the page allocator's free list) far more
/// than a uniform draw would.
#[derive(Clone, Debug)]
pub struct Operations(pub Vec<Operation>);

impl Arbitrary for Operations {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 64;
        let mut ops = Vec::with_capacity(len);
        let mut live: usize = 0;

        for _ in 0..len {
            if live > 0 && bool::arbitrary(g) {
                ops.push(Operation::Free(usize::arbitrary(g) % live));
                live -= 1;
            } else {
                let size = 1 + (u8::arbitrary(g) % 4) as usize;
                ops.push(Operation::Alloc(size));
                live += 1;
            }
        }

        Operations(ops)
    }
}
