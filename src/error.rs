//! Error taxonomy shared by startup wiring and request handling.
//!
//! # Categories
//! - `ConfigurationError`: fatal, startup only. The controller never becomes ready.
//! - `ProcessingError`: raised per request by a delegated handler and passed
//!   through to the HTTP layer untouched.
//!
//! Lookup misses (`registry::LookupError::NotFound`) never leave the strategy
//! resolver; they trigger the default fallback instead.

use axum::http::Method;
use thiserror::Error;

use crate::registry::RegistryError;

/// Errors that abort controller initialization.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The descriptor has no entry for the capability.
    #[error("no default strategy declared for capability `{capability}`")]
    NoDefaultStrategy { capability: &'static str },

    /// The descriptor names an implementation that was not compiled in.
    #[error("default strategy `{implementation}` for capability `{capability}` is not available")]
    UnknownImplementation {
        capability: &'static str,
        implementation: String,
    },

    /// The default implementation failed while being constructed.
    #[error("could not instantiate default strategy `{implementation}` for capability `{capability}`: {reason}")]
    Instantiation {
        capability: &'static str,
        implementation: String,
        reason: String,
    },

    /// A registered object exists under the name but has another type.
    #[error("object `{name}` is not of required type `{expected}`")]
    TypeMismatch { name: String, expected: &'static str },

    /// The bundled default strategies resource could not be parsed.
    #[error("invalid default strategies descriptor: {0}")]
    Descriptor(String),

    /// Registry could not be populated.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A WSDL document referenced by configuration could not be loaded.
    #[error("could not load WSDL document `{name}` from {path}: {source}")]
    WsdlDocument {
        name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while handling a single request.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The handler does not accept this HTTP method.
    #[error("method {method} not allowed, expected {allowed}")]
    MethodNotAllowed { method: Method, allowed: Method },

    /// Request body could not be read.
    #[error("could not read request body: {0}")]
    Body(String),

    /// Request body exceeded the configured limit.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// The message codec rejected the payload.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// No endpoint accepted the request message.
    #[error("no endpoint found for message of type `{content_type}`")]
    NoEndpointFound { content_type: String },

    /// An endpoint failed while processing the message.
    #[error("endpoint `{endpoint}` failed: {reason}")]
    Endpoint { endpoint: String, reason: String },

    /// The WSDL document could not be rendered.
    #[error("could not render WSDL document: {0}")]
    Wsdl(String),
}

/// Result type for request processing.
pub type ProcessingResult<T> = Result<T, ProcessingError>;
