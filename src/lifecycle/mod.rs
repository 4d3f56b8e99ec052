//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast to every long-running task
//!     → server stops accepting, prober exits, event queue drains
//!
//! Signals (signals.rs):
//!     Ctrl-C → trigger the shutdown broadcast
//! ```
//!
//! # Design Decisions
//! - One broadcast coordinator; every background task subscribes
//! - The event channel is never closed as a termination protocol; the
//!   writer drains it after the broadcast fires

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
