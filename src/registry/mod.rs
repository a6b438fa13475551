//! Layered configuration registry.
//!
//! # Data Flow
//! ```text
//! startup wiring
//!     → Scope::register(name, Arc<T>)      (one scope per configuration layer)
//!     → Registry::new(root).child(scope)   (outermost first, innermost last)
//!     → frozen, shared read-only with the controller
//!
//! lookup_by_name:       innermost → outermost, first hit wins
//! lookup_all_by_type:   outermost → innermost, inner entries replace outer ones
//! ```
//!
//! # Design Decisions
//! - Entries are stored type-erased as `Box<dyn Any>` facets, each holding an `Arc<T>`
//! - Capability registration (`register_wsdl`, `register_endpoint`, ...) stores the
//!   concrete type and the trait object, so a document is found by its trait
//!   whichever way it was built
//! - A name is unique within one scope; across scopes the innermost definition shadows
//! - The registry is never mutated once handed to the controller

mod scope;

pub use scope::Scope;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while populating a scope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("object `{name}` is already registered in scope `{scope}`")]
    DuplicateName { scope: String, name: String },
}

/// Outcome of a failed lookup by name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Nothing is registered under the name in any scope.
    #[error("no object named `{0}` is registered")]
    NotFound(String),

    /// The name is registered, but with a different type.
    #[error("object `{name}` is not of required type `{expected}`")]
    TypeMismatch { name: String, expected: &'static str },
}

/// A stack of scopes, searched like nested configuration contexts.
#[derive(Debug)]
pub struct Registry {
    /// Outermost (root) scope first.
    scopes: Vec<Scope>,
}

impl Registry {
    /// Create a registry with a single root scope.
    pub fn new(root: Scope) -> Self {
        Self { scopes: vec![root] }
    }

    /// Push a child scope. The child becomes the innermost layer.
    pub fn child(mut self, scope: Scope) -> Self {
        self.scopes.push(scope);
        self
    }

    /// Names of all scopes, outermost first.
    pub fn scope_names(&self) -> Vec<&str> {
        self.scopes.iter().map(Scope::name).collect()
    }

    /// Look up the object registered under `name`, searching the innermost scope first.
    pub fn lookup_by_name<T>(&self, name: &str) -> Result<Arc<T>, LookupError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        for scope in self.scopes.iter().rev() {
            if scope.contains(name) {
                return scope.get::<T>(name).ok_or_else(|| LookupError::TypeMismatch {
                    name: name.to_string(),
                    expected: std::any::type_name::<T>(),
                });
            }
        }
        Err(LookupError::NotFound(name.to_string()))
    }

    /// Collect every object of type `T`, keyed by registered name.
    ///
    /// With `include_ancestors` all scopes are merged and a name defined in an
    /// inner scope replaces the same name from an outer one. Without it only the
    /// innermost scope is scanned.
    pub fn lookup_all_by_type<T>(&self, include_ancestors: bool) -> HashMap<String, Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let scopes = if include_ancestors {
            &self.scopes[..]
        } else {
            &self.scopes[self.scopes.len() - 1..]
        };

        let mut found = HashMap::new();
        for scope in scopes {
            for (name, value) in scope.all_of_type::<T>() {
                if found.insert(name.to_string(), value).is_some() {
                    tracing::debug!(
                        scope = %scope.name(),
                        name = %name,
                        "Inner scope overrides object from ancestor scope"
                    );
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeting: Send + Sync {
        fn text(&self) -> String;
    }

    struct Fixed(&'static str);

    impl Greeting for Fixed {
        fn text(&self) -> String {
            self.0.to_string()
        }
    }

    fn greeting(text: &'static str) -> Arc<dyn Greeting> {
        Arc::new(Fixed(text))
    }

    fn layered() -> Registry {
        let mut root = Scope::new("root");
        root.register("hello", greeting("root hello")).unwrap();
        root.register("bye", greeting("root bye")).unwrap();
        root.register("count", Arc::new(7u32)).unwrap();

        let mut child = Scope::new("child");
        child.register("hello", greeting("child hello")).unwrap();
        child.register("welcome", greeting("child welcome")).unwrap();

        Registry::new(root).child(child)
    }

    #[test]
    fn test_lookup_by_name_prefers_inner_scope() {
        let registry = layered();
        let hello = registry.lookup_by_name::<dyn Greeting>("hello").unwrap();
        assert_eq!(hello.text(), "child hello");

        let bye = registry.lookup_by_name::<dyn Greeting>("bye").unwrap();
        assert_eq!(bye.text(), "root bye");
    }

    #[test]
    fn test_lookup_by_name_missing() {
        let registry = layered();
        let err = registry.lookup_by_name::<dyn Greeting>("absent").err().unwrap();
        assert_eq!(err, LookupError::NotFound("absent".into()));
    }

    #[test]
    fn test_lookup_by_name_wrong_type() {
        let registry = layered();
        let err = registry.lookup_by_name::<dyn Greeting>("count").err().unwrap();
        assert!(matches!(err, LookupError::TypeMismatch { ref name, .. } if name == "count"));

        let count = registry.lookup_by_name::<u32>("count").unwrap();
        assert_eq!(*count, 7);
    }

    #[test]
    fn test_lookup_all_including_ancestors() {
        let registry = layered();
        let all = registry.lookup_all_by_type::<dyn Greeting>(true);

        assert_eq!(all.len(), 3);
        assert_eq!(all["hello"].text(), "child hello");
        assert_eq!(all["bye"].text(), "root bye");
        assert_eq!(all["welcome"].text(), "child welcome");
    }

    #[test]
    fn test_lookup_all_innermost_only() {
        let registry = layered();
        let all = registry.lookup_all_by_type::<dyn Greeting>(false);

        assert_eq!(all.len(), 2);
        assert!(all.contains_key("hello"));
        assert!(!all.contains_key("bye"));
    }

    #[test]
    fn test_scope_names_outermost_first() {
        let registry = layered();
        assert_eq!(registry.scope_names(), vec!["root", "child"]);
    }
}
