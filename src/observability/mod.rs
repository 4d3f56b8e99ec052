//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling and health probes produce:
//!     → logging.rs (balancer events through a bounded channel)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → A single writer task draining events to the output stream
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Balancer events are a bounded pipeline: a full buffer drops the
//!   event instead of blocking a request task
//! - Diagnostic logging stays on `tracing`; the event pipeline is the
//!   balancer's own record of dispatch and health outcomes
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;

pub use logging::{LogEvent, LogSink, LogWriter, Severity};
