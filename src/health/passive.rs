//! Passive health probing.
//!
//! # Responsibilities
//! - Periodically dial every backend over TCP
//! - Refresh each backend's alive flag from the dial outcome
//!
//! # Design Decisions
//! - A bounded-timeout dial; the prober never hangs on one backend
//! - Probing is independent of traffic, so dead backends recover even
//!   when no requests arrive

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::time;

use crate::config::schema::HealthConfig;
use crate::load_balancer::backend::Backend;
use crate::load_balancer::pool::BackendPool;
use crate::observability::logging::{LogSink, Severity};
use crate::observability::metrics;

/// Periodic TCP prober over the whole backend set.
pub struct PassiveProber {
    pool: Arc<BackendPool>,
    config: HealthConfig,
    sink: LogSink,
}

impl PassiveProber {
    pub fn new(pool: Arc<BackendPool>, config: HealthConfig, sink: LogSink) -> Self {
        Self { pool, config, sink }
    }

    /// Run until the shutdown signal fires. The first probe pass happens
    /// immediately, then once per configured interval.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.config.interval_secs,
            timeout_secs = self.config.timeout_secs,
            "passive prober starting"
        );

        let mut ticker = time::interval(Duration::from_secs(self.config.interval_secs));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.check_all().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("passive prober received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    async fn check_all(&self) {
        let timeout = Duration::from_secs(self.config.timeout_secs);

        for backend in self.pool.backends() {
            let alive = dial(backend, timeout, &self.sink).await;
            backend.set_alive(alive);

            if alive {
                self.sink.emit(
                    Severity::Info,
                    format!("{} checked ok by healthcheck", backend.url()),
                );
            }
            metrics::record_backend_health(&backend.authority(), alive);
        }
    }
}

/// Dial one backend. A failure emits exactly one ERROR event carrying the
/// dial error.
async fn dial(backend: &Backend, timeout: Duration, sink: &LogSink) -> bool {
    let authority = backend.authority();

    match time::timeout(timeout, TcpStream::connect(authority.as_str())).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            sink.emit(
                Severity::Error,
                format!("unreachable to {}, error: {}", authority, e),
            );
            false
        }
        Err(_) => {
            sink.emit(
                Severity::Error,
                format!("unreachable to {}, error: dial timed out", authority),
            );
            false
        }
    }
}
