//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → round_robin.rs (advance the shared rotation cursor)
//!     → pool.rs (ordered backend set built from configuration)
//!     → backend.rs (per-backend alive flag)
//!     → Return the selected backend to the dispatcher
//! ```
//!
//! # Design Decisions
//! - The backend set is static; only the alive flags and the cursor mutate
//! - Dead backends are skipped by scanning forward, wrapping at most once
//! - When every backend is dead the unskipped candidate is still returned,
//!   so the dispatcher decides how to fail, not the selector

pub mod backend;
pub mod pool;
pub mod round_robin;

pub use backend::Backend;
pub use pool::BackendPool;
pub use round_robin::RoundRobin;
