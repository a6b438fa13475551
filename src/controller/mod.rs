//! Front controller for the message service path.
//!
//! # States
//! ```text
//! ControllerBuilder (uninitialized)
//!     → initialize(&Registry)
//!         1. resolve "messageFactory"  (named, else default)
//!         2. resolve "messageReceiver" (named, else default + owner name)
//!         3. build handlers (WSDL location rewriting on/off)
//!         4. index every WsdlDefinition in the registry, ancestors included
//!     → FrontController (ready, immutable)
//! ```
//!
//! # Design Decisions
//! - There is no uninitialized controller value, so a request can never reach one
//! - Any initialization failure is returned and nothing half-built escapes
//! - Ready state is read-only; share it across requests with `Arc`
//! - Handler failures pass through unchanged

pub mod routing;

pub use routing::{extract_filename, WSDL_SUFFIX};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
};

use crate::error::{ConfigurationError, ProcessingResult};
use crate::handler::{MessageReceiverHandler, WsdlDefinitionHandler};
use crate::message::MessageFactory;
use crate::receiver::MessageReceiver;
use crate::registry::Registry;
use crate::strategy::{Resolved, StrategyResolver};
use crate::wsdl::WsdlDefinition;

/// Well-known registry name of the message codec.
pub const MESSAGE_FACTORY_NAME: &str = "messageFactory";

/// Well-known registry name of the message receiver.
pub const MESSAGE_RECEIVER_NAME: &str = "messageReceiver";

/// Default limit for buffered message bodies.
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Where a request goes.
#[derive(Clone)]
pub enum Route<'a> {
    /// `GET X.wsdl` for a registered document `X`.
    Wsdl {
        name: &'a str,
        definition: &'a Arc<dyn WsdlDefinition>,
    },
    /// Everything else.
    Message,
}

impl Route<'_> {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Route::Wsdl { .. } => "wsdl",
            Route::Message => "message",
        }
    }
}

impl std::fmt::Debug for Route<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Wsdl { name, .. } => f.debug_struct("Wsdl").field("name", name).finish(),
            Route::Message => f.write_str("Message"),
        }
    }
}

/// Settings of a controller that has not been initialized yet.
#[derive(Debug, Clone)]
pub struct ControllerBuilder {
    name: String,
    transform_wsdl_locations: bool,
    max_body_size: usize,
}

impl ControllerBuilder {
    /// `name` is the controller's logical name, handed to name-aware default receivers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform_wsdl_locations: false,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Rewrite relative `location` attributes in served WSDL to the request URL.
    pub fn transform_wsdl_locations(mut self, transform: bool) -> Self {
        self.transform_wsdl_locations = transform;
        self
    }

    pub fn max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Initialize against `registry` using the bundled default strategies.
    pub fn initialize(self, registry: &Registry) -> Result<FrontController, ConfigurationError> {
        let resolver = StrategyResolver::bundled()?;
        self.initialize_with(registry, resolver)
    }

    /// Initialize with an explicit strategy resolver.
    pub fn initialize_with(
        self,
        registry: &Registry,
        resolver: StrategyResolver<'_>,
    ) -> Result<FrontController, ConfigurationError> {
        let message_factory = resolver
            .resolve::<dyn MessageFactory>(registry, MESSAGE_FACTORY_NAME)?
            .into_shared();
        let receiver_handler = MessageReceiverHandler::new(message_factory, self.max_body_size);

        let message_receiver = match resolver.resolve::<dyn MessageReceiver>(registry, MESSAGE_RECEIVER_NAME)? {
            Resolved::Default(mut receiver) => {
                if let Some(aware) = receiver.as_name_aware() {
                    aware.set_name(&self.name);
                }
                Arc::from(receiver)
            }
            named => named.into_shared(),
        };

        let wsdl_handler = WsdlDefinitionHandler::new(self.transform_wsdl_locations);
        let wsdl_definitions = registry.lookup_all_by_type::<dyn WsdlDefinition>(true);

        tracing::info!(
            controller = %self.name,
            wsdl_definitions = wsdl_definitions.len(),
            transform_wsdl_locations = self.transform_wsdl_locations,
            "Front controller initialized"
        );

        Ok(FrontController {
            name: self.name,
            receiver_handler,
            wsdl_handler,
            message_receiver,
            wsdl_definitions,
        })
    }
}

/// An initialized front controller.
pub struct FrontController {
    name: String,
    receiver_handler: MessageReceiverHandler,
    wsdl_handler: WsdlDefinitionHandler,
    message_receiver: Arc<dyn MessageReceiver>,
    wsdl_definitions: HashMap<String, Arc<dyn WsdlDefinition>>,
}

impl FrontController {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message_factory(&self) -> &Arc<dyn MessageFactory> {
        self.receiver_handler.message_factory()
    }

    pub fn message_receiver(&self) -> &Arc<dyn MessageReceiver> {
        &self.message_receiver
    }

    pub fn wsdl_handler(&self) -> &WsdlDefinitionHandler {
        &self.wsdl_handler
    }

    pub fn wsdl_definition(&self, name: &str) -> Option<&Arc<dyn WsdlDefinition>> {
        self.wsdl_definitions.get(name)
    }

    /// Registered document names, sorted.
    pub fn wsdl_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.wsdl_definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Classify a request by method and path.
    pub fn route<'a>(&'a self, method: &Method, path: &str) -> Route<'a> {
        routing::wsdl_candidate(method, path)
            .and_then(|candidate| self.wsdl_definitions.get_key_value(candidate))
            .map_or(Route::Message, |(name, definition)| Route::Wsdl {
                name: name.as_str(),
                definition,
            })
    }

    /// Last-modified time of whatever the request would be served, `None` if unknown.
    pub fn last_modified(&self, request: &Request<Body>) -> Option<SystemTime> {
        match self.route(request.method(), request.uri().path()) {
            Route::Wsdl { definition, .. } => self.wsdl_handler.last_modified(request, definition.as_ref()),
            Route::Message => self
                .receiver_handler
                .last_modified(request, self.message_receiver.as_ref()),
        }
    }

    /// Delegate the request to exactly one handler.
    pub async fn service(&self, request: Request<Body>) -> ProcessingResult<Response> {
        let route = self.route(request.method(), request.uri().path());
        tracing::trace!(controller = %self.name, route = route.kind(), "Routing request");

        match route {
            Route::Wsdl { definition, .. } => self.wsdl_handler.handle(&request, definition.as_ref()),
            Route::Message => {
                self.receiver_handler
                    .handle(request, self.message_receiver.as_ref())
                    .await
            }
        }
    }
}

impl std::fmt::Debug for FrontController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontController")
            .field("name", &self.name)
            .field("wsdl_definitions", &self.wsdl_names())
            .field("wsdl_handler", &self.wsdl_handler)
            .finish_non_exhaustive()
    }
}
