//! A single configuration layer of named, shared objects.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::RegistryError;
use crate::message::MessageFactory;
use crate::receiver::{Endpoint, MessageReceiver};
use crate::wsdl::WsdlDefinition;

/// One typed view of a registered object. Always holds an `Arc<T>`.
struct Facet {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Facet {
    fn of<T>(value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// A registered object, reachable through each of its facets.
struct Entry {
    facets: Vec<Facet>,
}

impl Entry {
    fn get<T>(&self) -> Option<&Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.facets
            .iter()
            .find_map(|facet| facet.value.downcast_ref::<Arc<T>>())
    }
}

/// Named objects belonging to one configuration layer.
pub struct Scope {
    name: String,
    entries: HashMap<String, Entry>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `value` under `name`, found later only as exactly `T`.
    ///
    /// Pass trait objects as `Arc<dyn Trait>`. Concrete WSDL documents,
    /// endpoints and message collaborators go through the capability methods
    /// below so they are found by their trait. Names are unique within a scope.
    pub fn register<T>(&mut self, name: impl Into<String>, value: Arc<T>) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.insert(name.into(), vec![Facet::of(value)])
    }

    /// Builder-style variant of [`Scope::register`].
    pub fn with<T>(mut self, name: impl Into<String>, value: Arc<T>) -> Result<Self, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.register(name, value)?;
        Ok(self)
    }

    /// Register a WSDL document, found both as `W` and as `dyn WsdlDefinition`.
    pub fn register_wsdl<W>(&mut self, name: impl Into<String>, definition: Arc<W>) -> Result<(), RegistryError>
    where
        W: WsdlDefinition + 'static,
    {
        let capability: Arc<dyn WsdlDefinition> = definition.clone();
        self.insert(name.into(), vec![Facet::of(definition), Facet::of(capability)])
    }

    /// Builder-style variant of [`Scope::register_wsdl`].
    pub fn with_wsdl<W>(mut self, name: impl Into<String>, definition: Arc<W>) -> Result<Self, RegistryError>
    where
        W: WsdlDefinition + 'static,
    {
        self.register_wsdl(name, definition)?;
        Ok(self)
    }

    /// Register an endpoint, found both as `E` and as `dyn Endpoint`.
    pub fn register_endpoint<E>(&mut self, name: impl Into<String>, endpoint: Arc<E>) -> Result<(), RegistryError>
    where
        E: Endpoint + 'static,
    {
        let capability: Arc<dyn Endpoint> = endpoint.clone();
        self.insert(name.into(), vec![Facet::of(endpoint), Facet::of(capability)])
    }

    /// Register a message receiver, found both as `R` and as `dyn MessageReceiver`.
    pub fn register_message_receiver<R>(
        &mut self,
        name: impl Into<String>,
        receiver: Arc<R>,
    ) -> Result<(), RegistryError>
    where
        R: MessageReceiver + 'static,
    {
        let capability: Arc<dyn MessageReceiver> = receiver.clone();
        self.insert(name.into(), vec![Facet::of(receiver), Facet::of(capability)])
    }

    /// Register a message factory, found both as `F` and as `dyn MessageFactory`.
    pub fn register_message_factory<F>(
        &mut self,
        name: impl Into<String>,
        factory: Arc<F>,
    ) -> Result<(), RegistryError>
    where
        F: MessageFactory + 'static,
    {
        let capability: Arc<dyn MessageFactory> = factory.clone();
        self.insert(name.into(), vec![Facet::of(factory), Facet::of(capability)])
    }

    fn insert(&mut self, name: String, facets: Vec<Facet>) -> Result<(), RegistryError> {
        if self.entries.contains_key(&name) {
            return Err(RegistryError::DuplicateName {
                scope: self.name.clone(),
                name,
            });
        }

        tracing::trace!(
            scope = %self.name,
            name = %name,
            types = ?facets.iter().map(|facet| facet.type_name).collect::<Vec<_>>(),
            "Registered object"
        );
        self.entries.insert(name, Entry { facets });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Typed access to a single entry. `None` if absent or of another type.
    pub(crate) fn get<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.entries.get(name).and_then(Entry::get::<T>).cloned()
    }

    /// All entries reachable as type `T`.
    pub(crate) fn all_of_type<T>(&self) -> Vec<(&str, Arc<T>)>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.entries
            .iter()
            .filter_map(|(name, entry)| entry.get::<T>().map(|value| (name.as_str(), Arc::clone(value))))
            .collect()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.facets[0].type_name))
            .collect();
        names.sort_unstable();
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("entries", &names)
            .finish()
    }
}
