//! Backend pool management.
//!
//! # Responsibilities
//! - Own the ordered backend set built from configuration
//! - Expose backends for selection and for health probing

use std::sync::Arc;
use url::Url;

use crate::config::loader::ConfigError;
use crate::config::schema::BackendConfig;
use crate::config::validation::ValidationError;
use crate::load_balancer::backend::Backend;

/// Ordered, fixed set of upstream backends.
///
/// Built once at startup; the set never changes afterwards, only the
/// per-backend alive flags do.
#[derive(Debug)]
pub struct BackendPool {
    backends: Vec<Arc<Backend>>,
}

impl BackendPool {
    /// Build the pool from configuration, preserving the configured order.
    ///
    /// Fails when the list is empty or any URL does not parse; a pool is
    /// never constructed from a partially usable backend set.
    pub fn from_config(configs: &[BackendConfig]) -> Result<Self, ConfigError> {
        if configs.is_empty() {
            return Err(ConfigError::Validation(vec![ValidationError::NoBackends]));
        }

        let mut backends = Vec::with_capacity(configs.len());
        for config in configs {
            let url = Url::parse(&config.url).map_err(|e| {
                ConfigError::Validation(vec![ValidationError::InvalidBackendUrl {
                    url: config.url.clone(),
                    reason: e.to_string(),
                }])
            })?;
            backends.push(Arc::new(Backend::new(url)));
        }

        Ok(Self { backends })
    }

    /// The ordered backend set.
    pub fn backends(&self) -> &[Arc<Backend>] {
        &self.backends
    }

    /// Number of configured backends.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
