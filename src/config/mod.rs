//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BalancerConfig (validated, immutable)
//!     → shared with all subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the backend set is static for the
//!   process lifetime
//! - All sections besides `backends` have defaults, so a minimal document
//!   (`proxy.port` + `backends`) still loads
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BalancerConfig;
pub use schema::BackendConfig;
pub use schema::HealthConfig;
pub use schema::LogConfig;
pub use schema::ProxyConfig;
