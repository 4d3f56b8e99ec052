//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → round-robin selection over the backend set
//!     → forward to the selected backend, bounded retry on failure
//!     → upstream response relayed to the client
//! ```

pub mod server;

pub use server::HttpServer;
