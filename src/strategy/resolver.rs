//! Named lookup with fallback to default strategies.

use std::sync::Arc;

use crate::error::ConfigurationError;
use crate::registry::{LookupError, Registry};
use crate::strategy::{Capability, DefaultStrategyDescriptor, Resolved};

/// Resolves collaborators against a registry and a defaults descriptor.
#[derive(Debug, Clone, Copy)]
pub struct StrategyResolver<'a> {
    descriptor: &'a DefaultStrategyDescriptor,
}

impl StrategyResolver<'static> {
    /// Resolver backed by the bundled descriptor.
    pub fn bundled() -> Result<Self, ConfigurationError> {
        Ok(Self::new(DefaultStrategyDescriptor::bundled()?))
    }
}

impl<'a> StrategyResolver<'a> {
    pub fn new(descriptor: &'a DefaultStrategyDescriptor) -> Self {
        Self { descriptor }
    }

    /// Look up `name` in the registry as capability `C`.
    pub fn resolve_named<C>(&self, registry: &Registry, name: &str) -> Result<Arc<C>, LookupError>
    where
        C: Capability + ?Sized,
    {
        registry.lookup_by_name::<C>(name)
    }

    /// Build the first default implementation the descriptor lists for `C`.
    pub fn resolve_default<C>(&self, registry: &Registry) -> Result<Box<C>, ConfigurationError>
    where
        C: Capability + ?Sized,
    {
        let id = self
            .descriptor
            .implementations_for(C::KEY)
            .and_then(|ids| ids.first())
            .ok_or(ConfigurationError::NoDefaultStrategy { capability: C::KEY })?;

        let implementation = C::implementations()
            .iter()
            .find(|implementation| implementation.id == id)
            .ok_or_else(|| ConfigurationError::UnknownImplementation {
                capability: C::KEY,
                implementation: id.clone(),
            })?;

        tracing::debug!(capability = C::KEY, implementation = %id, "Instantiating default strategy");

        (implementation.create)(registry).map_err(|e| ConfigurationError::Instantiation {
            capability: C::KEY,
            implementation: id.clone(),
            reason: e.to_string(),
        })
    }

    /// Named lookup first, default strategy only when nothing is registered under `name`.
    pub fn resolve<C>(&self, registry: &Registry, name: &str) -> Result<Resolved<C>, ConfigurationError>
    where
        C: Capability + ?Sized,
    {
        match self.resolve_named::<C>(registry, name) {
            Ok(found) => {
                tracing::debug!(capability = C::KEY, name = %name, "Using registered strategy");
                Ok(Resolved::Named(found))
            }
            Err(LookupError::NotFound(_)) => {
                tracing::debug!(capability = C::KEY, name = %name, "No registered strategy, using default");
                self.resolve_default::<C>(registry).map(Resolved::Default)
            }
            Err(LookupError::TypeMismatch { name, expected }) => {
                Err(ConfigurationError::TypeMismatch { name, expected })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Scope;
    use crate::strategy::{FactoryError, Implementation};
    use std::cell::Cell;

    thread_local! {
        static POLITE_BUILT: Cell<usize> = const { Cell::new(0) };
    }

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Polite;

    impl Greeter for Polite {
        fn greet(&self) -> String {
            "good day".into()
        }
    }

    struct Registered;

    impl Greeter for Registered {
        fn greet(&self) -> String {
            "from registry".into()
        }
    }

    fn polite(_: &Registry) -> Result<Box<dyn Greeter>, FactoryError> {
        POLITE_BUILT.with(|built| built.set(built.get() + 1));
        Ok(Box::new(Polite))
    }

    fn broken(_: &Registry) -> Result<Box<dyn Greeter>, FactoryError> {
        Err("greeter offline".into())
    }

    impl Capability for dyn Greeter {
        const KEY: &'static str = "Greeter";

        fn implementations() -> &'static [Implementation<Self>] {
            const IMPLEMENTATIONS: &[Implementation<dyn Greeter>] = &[
                Implementation { id: "test::Polite", create: polite },
                Implementation { id: "test::Broken", create: broken },
            ];
            IMPLEMENTATIONS
        }
    }

    fn descriptor(greeters: &str) -> DefaultStrategyDescriptor {
        DefaultStrategyDescriptor::parse(&format!("version = 1\n[strategies]\nGreeter = {greeters}\n"))
            .unwrap()
    }

    fn empty_registry() -> Registry {
        Registry::new(Scope::new("root"))
    }

    fn built() -> usize {
        POLITE_BUILT.with(Cell::get)
    }

    #[test]
    fn test_named_strategy_wins() {
        let descriptor = descriptor(r#"["test::Polite"]"#);
        let resolver = StrategyResolver::new(&descriptor);
        let greeter: Arc<dyn Greeter> = Arc::new(Registered);
        let registry = Registry::new(Scope::new("root").with("greeter", greeter).unwrap());

        let before = built();
        let resolved = resolver.resolve::<dyn Greeter>(&registry, "greeter").unwrap();

        assert!(!resolved.is_default());
        assert_eq!(resolved.into_shared().greet(), "from registry");
        assert_eq!(built(), before, "default must not be constructed");
    }

    #[test]
    fn test_falls_back_to_first_default() {
        let descriptor = descriptor(r#"["test::Polite", "test::Broken"]"#);
        let resolver = StrategyResolver::new(&descriptor);

        let before = built();
        let resolved = resolver
            .resolve::<dyn Greeter>(&empty_registry(), "greeter")
            .unwrap();

        assert!(resolved.is_default());
        assert_eq!(resolved.into_shared().greet(), "good day");
        assert_eq!(built(), before + 1);
    }

    #[test]
    fn test_missing_descriptor_entry() {
        let descriptor = DefaultStrategyDescriptor::parse("version = 1\n").unwrap();
        let resolver = StrategyResolver::new(&descriptor);

        let err = resolver
            .resolve::<dyn Greeter>(&empty_registry(), "greeter")
            .err()
            .unwrap();
        assert!(matches!(err, ConfigurationError::NoDefaultStrategy { capability: "Greeter" }));
    }

    #[test]
    fn test_empty_descriptor_entry() {
        let descriptor = descriptor("[]");
        let resolver = StrategyResolver::new(&descriptor);

        let err = resolver.resolve_default::<dyn Greeter>(&empty_registry()).err().unwrap();
        assert!(matches!(err, ConfigurationError::NoDefaultStrategy { .. }));
    }

    #[test]
    fn test_unknown_implementation() {
        let descriptor = descriptor(r#"["test::Missing"]"#);
        let resolver = StrategyResolver::new(&descriptor);

        let err = resolver.resolve_default::<dyn Greeter>(&empty_registry()).err().unwrap();
        assert!(matches!(
            err,
            ConfigurationError::UnknownImplementation { ref implementation, .. } if implementation == "test::Missing"
        ));
    }

    #[test]
    fn test_factory_failure_is_fatal() {
        let descriptor = descriptor(r#"["test::Broken", "test::Polite"]"#);
        let resolver = StrategyResolver::new(&descriptor);

        let err = resolver
            .resolve::<dyn Greeter>(&empty_registry(), "greeter")
            .err()
            .unwrap();
        assert!(err.to_string().contains("greeter offline"));
    }

    #[test]
    fn test_wrong_type_under_name_is_fatal() {
        let descriptor = descriptor(r#"["test::Polite"]"#);
        let resolver = StrategyResolver::new(&descriptor);
        let registry = Registry::new(Scope::new("root").with("greeter", Arc::new(42u32)).unwrap());

        let before = built();
        let err = resolver.resolve::<dyn Greeter>(&registry, "greeter").err().unwrap();

        assert!(matches!(err, ConfigurationError::TypeMismatch { ref name, .. } if name == "greeter"));
        assert_eq!(built(), before);
    }
}
