//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Passive probing (passive.rs):
//!     Periodic ticker
//!     → TCP dial each backend with a timeout
//!     → refresh the alive flag, emit a balancer event
//!
//! Active downgrade (active.rs):
//!     Proxy attempt fails
//!     → mark that backend dead, emit a balancer event
//! ```
//!
//! # Design Decisions
//! - Active and passive checks are complementary; active only ever
//!   downgrades, so `both` is the only self-healing policy
//! - Liveness is a single boolean per backend, no flap thresholds
//! - The policy is selected by configuration, not by compiled-in variants

pub mod active;
pub mod passive;

use serde::{Deserialize, Serialize};

/// Which health mechanisms are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthPolicy {
    /// No health tracking; every backend is always considered alive.
    None,
    /// Mark a backend dead only when a proxied request to it fails.
    Active,
    /// Periodic TCP probing only.
    Passive,
    /// Active downgrade plus passive re-probing.
    #[default]
    Both,
}

impl HealthPolicy {
    /// Whether failed proxy attempts downgrade the backend.
    pub fn active_enabled(self) -> bool {
        matches!(self, HealthPolicy::Active | HealthPolicy::Both)
    }

    /// Whether the periodic TCP prober runs.
    pub fn passive_enabled(self) -> bool {
        matches!(self, HealthPolicy::Passive | HealthPolicy::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_predicates() {
        assert!(!HealthPolicy::None.active_enabled());
        assert!(!HealthPolicy::None.passive_enabled());
        assert!(HealthPolicy::Active.active_enabled());
        assert!(!HealthPolicy::Active.passive_enabled());
        assert!(!HealthPolicy::Passive.active_enabled());
        assert!(HealthPolicy::Passive.passive_enabled());
        assert!(HealthPolicy::Both.active_enabled());
        assert!(HealthPolicy::Both.passive_enabled());
    }

    #[test]
    fn policy_deserializes_from_lowercase_names() {
        let policy: HealthPolicy = serde_json::from_str(r#""active""#).unwrap();
        assert_eq!(policy, HealthPolicy::Active);
        let policy: HealthPolicy = serde_json::from_str(r#""both""#).unwrap();
        assert_eq!(policy, HealthPolicy::Both);
    }
}
