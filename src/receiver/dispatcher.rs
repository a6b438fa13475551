//! Default message receiver: first-match dispatch over registered endpoints.

use std::sync::Arc;

use crate::error::{ProcessingError, ProcessingResult};
use crate::message::MessageContext;
use crate::receiver::{Endpoint, MessageReceiver, NameAware};
use crate::registry::Registry;
use crate::strategy::FactoryError;

#[cfg(test)]
thread_local! {
    /// Dispatchers built through the default strategy on this thread.
    pub(crate) static DEFAULTS_BUILT: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Routes each message to the first endpoint that supports it.
///
/// Endpoints are collected once from the registry, ancestor scopes included,
/// and tried in name order.
pub struct MessageDispatcher {
    name: Option<String>,
    endpoints: Vec<(String, Arc<dyn Endpoint>)>,
}

impl MessageDispatcher {
    /// Identifier used in the default strategies descriptor.
    pub const ID: &'static str = "message_dispatcher::receiver::MessageDispatcher";

    pub fn new(endpoints: Vec<(String, Arc<dyn Endpoint>)>) -> Self {
        let mut endpoints = endpoints;
        endpoints.sort_by(|a, b| a.0.cmp(&b.0));
        Self { name: None, endpoints }
    }

    /// Build a dispatcher over every endpoint found in `registry`.
    pub fn from_registry(registry: &Registry) -> Self {
        let endpoints = registry
            .lookup_all_by_type::<dyn Endpoint>(true)
            .into_iter()
            .collect();
        Self::new(endpoints)
    }

    pub(crate) fn create_default(registry: &Registry) -> Result<Box<dyn MessageReceiver>, FactoryError> {
        #[cfg(test)]
        DEFAULTS_BUILT.with(|built| built.set(built.get() + 1));
        Ok(Box::new(Self::from_registry(registry)))
    }

    pub fn endpoint_names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(|(name, _)| name.as_str())
    }
}

impl MessageReceiver for MessageDispatcher {
    fn receive(&self, context: &mut MessageContext) -> ProcessingResult<()> {
        let (endpoint_name, endpoint) = self
            .endpoints
            .iter()
            .find(|(_, endpoint)| endpoint.supports(context.request()))
            .ok_or_else(|| ProcessingError::NoEndpointFound {
                content_type: context.request().content_type().to_string(),
            })?;

        tracing::debug!(
            dispatcher = self.name().unwrap_or("unnamed"),
            endpoint = %endpoint_name,
            "Dispatching message"
        );
        endpoint.invoke(context)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn as_name_aware(&mut self) -> Option<&mut dyn NameAware> {
        Some(self)
    }
}

impl NameAware for MessageDispatcher {
    fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }
}

impl std::fmt::Debug for MessageDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageDispatcher")
            .field("name", &self.name)
            .field("endpoints", &self.endpoint_names().collect::<Vec<_>>())
            .finish()
    }
}
