//! Round-robin selection strategy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::load_balancer::backend::Backend;

/// Round-robin selector.
///
/// Holds the shared rotation cursor. Every call advances the cursor
/// exactly once; the scan then skips dead backends, wrapping at most once
/// around the set. When every backend is dead the unskipped candidate is
/// returned so the caller still has something to attempt.
#[derive(Debug, Default)]
pub struct RoundRobin {
    cursor: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the next backend. `backends` must be non-empty; the pool
    /// guarantees that.
    pub fn next(&self, backends: &[Arc<Backend>]) -> Arc<Backend> {
        let start = self.cursor.fetch_add(1, Ordering::Relaxed);
        let len = backends.len();

        for i in 0..len {
            let candidate = &backends[(start + i) % len];
            if candidate.is_alive() {
                return candidate.clone();
            }
        }

        // All dead: hand back the unskipped candidate.
        backends[start % len].clone()
    }
}
