//! Front controller for an HTTP-hosted message service.
//!
//! Every request on the service path is either a request for a WSDL document
//! (`GET …/X.wsdl` for a registered document `X`) or a message to dispatch.
//! Collaborators are resolved once at startup: by well-known name from a
//! layered registry, falling back to bundled default strategies.

pub mod config;
pub mod controller;
pub mod error;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod message;
pub mod observability;
pub mod receiver;
pub mod registry;
pub mod strategy;
pub mod wsdl;

pub use config::DispatcherConfig;
pub use controller::{ControllerBuilder, FrontController, Route};
pub use error::{ConfigurationError, ProcessingError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::{Registry, Scope};
