//! Cooperative stop request shared with an interrupt or signal handler.

use core::sync::atomic::{AtomicBool, Ordering};

/// Stop request flag.
///
/// [`StopFlag::request`] is a single atomic store, so it may be called from a
/// signal handler or ISR. Long-running operations poll the flag between steps
/// and never inside a dwell; the handler itself must not call the blocking
/// step API.
///
/// ```rust,ignore
/// static STOP: StopFlag = StopFlag::new();
///
/// // in the signal handler
/// STOP.request();
/// ```
#[derive(Debug, Default)]
pub struct StopFlag(AtomicBool);

impl StopFlag {
    /// Create a flag with no stop requested.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Ask running operations to stop at the next step boundary.
    #[inline]
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Withdraw a pending request.
    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
