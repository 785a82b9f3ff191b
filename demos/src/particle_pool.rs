//! A toy particle system that hands out its per-frame scratch from a
//! `StackAllocator` and its longer-lived particle records from a
//! `DefaultInlineAllocator`, falling back to the host heap only once the
//! inline pool is exhausted.

use alloc_policies::{AllocatorPolicy, DefaultInlineAllocator, FallbackAllocator, GlobalAllocator, InlineAllocator, StackAllocator};

struct Particle {
    x: f32,
    y: f32,
    vy: f32,
}

fn main() {
    let particles: DefaultInlineAllocator<64, Particle> =
        FallbackAllocator::new(InlineAllocator::new(), GlobalAllocator::new());
    let scratch = StackAllocator::new(4096);

    let mut live = Vec::new();
    for i in 0..80 {
        let p = particles
            .allocate(1)
            .expect("DefaultInlineAllocator falls back to the heap, so this never fails");
        unsafe {
            p.as_ptr().write(Particle {
                x: i as f32,
                y: 0.0,
                vy: 1.0,
            });
        }
        live.push(p);
    }

    // Per-frame scratch: bump-allocate a buffer, use it, release it in
    // exact reverse order before the next frame.
    let frame_buf = scratch.allocate(1024).expect("fits in the 4096-byte arena");
    unsafe { core::ptr::write_bytes(frame_buf.as_ptr(), 0, 1024) };
    unsafe { scratch.deallocate(frame_buf, 1024) };

    for p in &live {
        unsafe {
            (*p.as_ptr()).y += (*p.as_ptr()).vy;
        }
    }

    let total_x: f32 = live.iter().map(|p| unsafe { (*p.as_ptr()).x }).sum();
    println!(
        "advanced {} particles (total x = {total_x}) using {} bytes of scratch",
        live.len(),
        1024
    );

    for p in live {
        unsafe { particles.deallocate(p, 1) };
    }
}
