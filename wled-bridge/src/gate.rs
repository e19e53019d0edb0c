//! The single in-flight request gate.
//!
//! WLED runs its HTTP server on one small core; concurrent requests
//! make it drop connections. The gate guarantees at most one outbound
//! request at a time per device client. Waiters are served in FIFO
//! order (tokio's mutex hands off fairly), so queued operations
//! complete in the order they were issued.

use tokio::sync::{Mutex, MutexGuard};

pub struct RequestGate {
    lock: Mutex<()>,
}

/// Holding a permit is holding the gate; dropping it releases the
/// gate to the next waiter.

pub struct GatePermit<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl RequestGate {
    pub fn new() -> Self {
        RequestGate {
            lock: Mutex::new(()),
        }
    }

    /// Suspends the caller until the gate is free.

    pub async fn acquire(&self) -> GatePermit<'_> {
        GatePermit {
            _guard: self.lock.lock().await,
        }
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        RequestGate::new()
    }
}
