//! Active health downgrade.
//!
//! # Responsibilities
//! - React to failed proxy attempts by marking the backend dead
//! - Emit the balancer event naming the dead target
//!
//! Liveness is only ever downgraded here. Under the `active` policy alone
//! a dead backend stays dead until the process restarts; the passive
//! prober is what brings backends back.

use crate::health::HealthPolicy;
use crate::load_balancer::backend::Backend;
use crate::observability::logging::{LogSink, Severity};
use crate::observability::metrics;

/// Record a failed proxy attempt against `backend`.
///
/// The failure event is always emitted; the downgrade itself only happens
/// when the policy has active checks enabled.
pub fn record_failure(backend: &Backend, policy: HealthPolicy, sink: &LogSink) {
    sink.emit(Severity::Error, format!("{} is dead", backend.authority()));

    if policy.active_enabled() {
        backend.set_alive(false);
        metrics::record_backend_health(&backend.authority(), false);
    }
}
