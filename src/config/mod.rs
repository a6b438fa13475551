//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → DispatcherConfig (validated, immutable)
//!     → lifecycle::startup builds the registry and the front controller from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the controller is built from it exactly once
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, LoadError};
pub use schema::DispatcherConfig;
pub use schema::DispatcherSettings;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::WsdlConfig;
