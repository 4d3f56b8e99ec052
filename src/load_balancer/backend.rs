//! Backend abstraction.
//!
//! # Responsibilities
//! - Represent a single upstream server
//! - Track the alive/dead flag under concurrent access

use std::sync::atomic::{AtomicBool, Ordering};
use url::Url;

/// A single upstream server.
///
/// The URL is immutable after load. The alive flag is written by the
/// health probes and read by the selector and dispatcher; the atomic is
/// the only mutation point.
#[derive(Debug)]
pub struct Backend {
    url: Url,
    alive: AtomicBool,
}

impl Backend {
    /// Create a new backend. Backends start out alive.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            alive: AtomicBool::new(true),
        }
    }

    /// The configured upstream URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The "host:port" authority, used for TCP health dials and for
    /// rewriting request URIs.
    pub fn authority(&self) -> String {
        // Validation guarantees a host is present.
        let host = self.url.host_str().unwrap_or("localhost");
        match self.url.port_or_known_default() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Update the liveness flag.
    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::Release);
    }

    /// Read the liveness flag.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}
