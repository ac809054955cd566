//! Single-frame-in-flight gate.
//!
//! Capture callbacks may fire on a camera thread while the previous frame
//! is still being processed.  The gate lets exactly one through; the host
//! drops any frame that arrives while the gate is held, so frames are never
//! queued behind a slow pass.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct FrameGate {
    busy: AtomicBool,
    dropped: AtomicU64,
}

impl FrameGate {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            dropped: AtomicU64::new(0),
        }
    }

    /// Claim the gate, or `None` (and count a dropped frame) if a frame is
    /// already in flight.
    pub fn try_enter(&self) -> Option<FrameGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(FrameGuard { gate: self })
        } else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Frames refused since construction.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Releases the gate on drop.
#[must_use = "the gate is released as soon as the guard is dropped"]
pub struct FrameGuard<'a> {
    gate: &'a FrameGate,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
