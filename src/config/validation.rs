//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject an empty backend set
//! - Reject backend URLs that cannot be dialed or forwarded to
//! - Validate the listening port
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Runs before config is accepted into the system, so malformed backend
//!   addresses can never reach the dispatch path

use url::Url;

use crate::config::schema::BalancerConfig;

/// A single validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("no backends configured")]
    NoBackends,

    #[error("invalid backend url `{url}`: {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("backend url `{url}` must use the http scheme")]
    UnsupportedScheme { url: String },

    #[error("backend url `{url}` has no host")]
    MissingHost { url: String },

    #[error("proxy port `{port}` is not a valid port number")]
    InvalidPort { port: String },
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &BalancerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.backends.is_empty() {
        errors.push(ValidationError::NoBackends);
    }

    for backend in &config.backends {
        match Url::parse(&backend.url) {
            Ok(url) => {
                if url.scheme() != "http" {
                    errors.push(ValidationError::UnsupportedScheme {
                        url: backend.url.clone(),
                    });
                } else if url.host_str().is_none() {
                    errors.push(ValidationError::MissingHost {
                        url: backend.url.clone(),
                    });
                }
            }
            Err(e) => {
                errors.push(ValidationError::InvalidBackendUrl {
                    url: backend.url.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if config.proxy.port.parse::<u16>().is_err() {
        errors.push(ValidationError::InvalidPort {
            port: config.proxy.port.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BackendConfig;

    fn config_with_backends(urls: &[&str]) -> BalancerConfig {
        BalancerConfig {
            backends: urls
                .iter()
                .map(|url| BackendConfig {
                    url: url.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_plain_http_backends() {
        let config = config_with_backends(&["http://localhost:8081", "http://10.0.0.2:80"]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_empty_backend_set() {
        let errors = validate_config(&BalancerConfig::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::NoBackends)));
    }

    #[test]
    fn rejects_unparsable_url() {
        let config = config_with_backends(&["not a url"]);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidBackendUrl { .. })));
    }

    #[test]
    fn rejects_https_scheme() {
        let config = config_with_backends(&["https://localhost:8081"]);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnsupportedScheme { .. })));
    }

    #[test]
    fn collects_every_error() {
        let mut config = config_with_backends(&["nope://x", ":::"]);
        config.proxy.port = "eighty".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
