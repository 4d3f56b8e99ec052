//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for the shutdown signal (Ctrl-C)
//! - Translate it into the internal shutdown broadcast
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - If the handler cannot be installed the task parks instead of
//!   triggering a spurious shutdown

/// Wait for the first shutdown-worthy OS signal.
pub async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to install signal handler");
            std::future::pending::<()>().await;
        }
    }
}
