//! In-flight indicator shared between a flow and whoever renders it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Set while a request is in flight. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set the flag until the returned guard is dropped.
    pub(crate) fn raise(&self) -> BusyGuard {
        self.0.store(true, Ordering::Release);
        BusyGuard(self.clone())
    }
}

/// Clears its flag on drop, including when the owning future is dropped
/// mid-request.
#[must_use = "the flag is cleared as soon as the guard is dropped"]
pub(crate) struct BusyGuard(BusyFlag);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0 .0.store(false, Ordering::Release);
    }
}
