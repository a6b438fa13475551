//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the layered registry from configuration
//! - Initialize the front controller against it
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Registry layers: `builtin` (echo endpoint) → `application` (configured
//!   WSDL documents) → `overrides` (objects supplied by the embedding program)
//! - The HTTP server only accepts an initialized controller, so listeners
//!   cannot start before this completes

use std::path::Path;
use std::sync::Arc;

use crate::config::DispatcherConfig;
use crate::controller::{ControllerBuilder, FrontController};
use crate::error::ConfigurationError;
use crate::receiver::EchoEndpoint;
use crate::registry::{Registry, Scope};
use crate::wsdl::SimpleWsdlDefinition;

/// Registry name of the built-in echo endpoint.
pub const ECHO_ENDPOINT_NAME: &str = "echoEndpoint";

/// Build the registry described by `config`.
///
/// Relative WSDL paths are resolved against `base_dir`. `overrides` becomes the
/// innermost layer, so anything registered there shadows the other layers.
pub fn build_registry(
    config: &DispatcherConfig,
    base_dir: &Path,
    overrides: Scope,
) -> Result<Registry, ConfigurationError> {
    let mut builtin = Scope::new("builtin");
    if config.dispatcher.echo_endpoint {
        builtin.register_endpoint(ECHO_ENDPOINT_NAME, Arc::new(EchoEndpoint))?;
    }

    let mut application = Scope::new("application");
    for wsdl in &config.wsdl {
        let path = base_dir.join(&wsdl.path);
        let definition = SimpleWsdlDefinition::from_file(&path).map_err(|source| {
            ConfigurationError::WsdlDocument {
                name: wsdl.name.clone(),
                path: path.display().to_string(),
                source,
            }
        })?;
        tracing::debug!(name = %wsdl.name, path = %path.display(), "Loaded WSDL document");

        application.register_wsdl(wsdl.name.clone(), Arc::new(definition))?;
    }

    Ok(Registry::new(builtin).child(application).child(overrides))
}

/// Build the registry and initialize the controller.
pub fn bootstrap(config: &DispatcherConfig, base_dir: &Path) -> Result<FrontController, ConfigurationError> {
    bootstrap_with_overrides(config, base_dir, Scope::new("overrides"))
}

/// Like [`bootstrap`], with caller-supplied objects in the innermost layer.
pub fn bootstrap_with_overrides(
    config: &DispatcherConfig,
    base_dir: &Path,
    overrides: Scope,
) -> Result<FrontController, ConfigurationError> {
    let registry = build_registry(config, base_dir, overrides)?;
    tracing::debug!(scopes = ?registry.scope_names(), "Registry built");

    ControllerBuilder::new(config.dispatcher.name.clone())
        .transform_wsdl_locations(config.dispatcher.transform_wsdl_locations)
        .max_body_size(config.security.max_body_size)
        .initialize(&registry)
}
