//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! balancer. All types derive Serde traits for deserialization from JSON
//! config files.

use serde::{Deserialize, Serialize};

use crate::health::HealthPolicy;

/// Root configuration for the load balancer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BalancerConfig {
    /// Listener settings.
    pub proxy: ProxyConfig,

    /// Upstream server definitions. The order here defines the rotation
    /// order.
    pub backends: Vec<BackendConfig>,

    /// Health checking settings.
    pub health: HealthConfig,

    /// Balancer event log settings.
    pub log: LogConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listening port. Kept as a string because config documents quote
    /// it; may be overridden on the command line.
    pub port: String,

    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: "8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// A single upstream server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend URL (e.g., "http://localhost:8081").
    pub url: String,
}

/// Health checking configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Which health mechanisms are enabled.
    pub mode: HealthPolicy,

    /// Passive probe interval in seconds.
    pub interval_secs: u64,

    /// Per-dial timeout for passive probes in seconds.
    pub timeout_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            mode: HealthPolicy::default(),
            interval_secs: 10,
            timeout_secs: 5,
        }
    }
}

/// Balancer event log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Event buffer capacity. Events emitted while the buffer is full are
    /// dropped rather than blocking request handling.
    pub buffer: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { buffer: 50 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_omitted_sections() {
        let config = BalancerConfig::default();
        assert_eq!(config.proxy.port, "8080");
        assert_eq!(config.health.interval_secs, 10);
        assert_eq!(config.log.buffer, 50);
        assert!(config.backends.is_empty());
        assert_eq!(config.health.mode, HealthPolicy::Both);
    }

    #[test]
    fn health_mode_deserializes_from_lowercase() {
        let health: HealthConfig =
            serde_json::from_str(r#"{ "mode": "passive", "interval_secs": 3 }"#).unwrap();
        assert_eq!(health.mode, HealthPolicy::Passive);
        assert_eq!(health.interval_secs, 3);
        // Omitted fields fall back to defaults.
        assert_eq!(health.timeout_secs, 5);
    }
}
