//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0, addresses parse)
//! - Check WSDL document names are usable as `<name>.wsdl` file names
//! - Detect duplicate document names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DispatcherConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::DispatcherConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address `{value}`")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("service path `{0}` must start with `/`")]
    ServicePath(String),

    #[error("dispatcher name must not be empty")]
    EmptyName,

    #[error("invalid WSDL document name `{0}`")]
    WsdlName(String),

    #[error("WSDL document `{0}` is configured more than once")]
    DuplicateWsdl(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &DispatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "security.max_body_size" });
    }

    if !config.dispatcher.service_path.starts_with('/') {
        errors.push(ValidationError::ServicePath(config.dispatcher.service_path.clone()));
    }

    if config.dispatcher.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    let mut seen = HashSet::new();
    for wsdl in &config.wsdl {
        if !is_valid_document_name(&wsdl.name) {
            errors.push(ValidationError::WsdlName(wsdl.name.clone()));
        }
        if !seen.insert(wsdl.name.as_str()) {
            errors.push(ValidationError::DuplicateWsdl(wsdl.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A name `X` must map back to itself when `X.wsdl` is requested.
fn is_valid_document_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '.', ';', '?'])
}
