//! Strategy resolution for pluggable collaborators.
//!
//! # Data Flow
//! ```text
//! resolve::<dyn C>(registry, "wellKnownName")
//!     → registry.lookup_by_name         found      → Resolved::Named
//!                                       NotFound   ↓
//!     → descriptor entry for C::KEY     (bundled default_strategies.toml)
//!     → first implementation id         → compiled factory table of C
//!     → factory(registry)               → Resolved::Default
//! ```
//!
//! # Design Decisions
//! - A capability is a trait; `impl Capability for dyn Trait` ties it to a
//!   descriptor key and a static table of factory functions
//! - The descriptor only selects among compiled factories, nothing is loaded by name at runtime
//! - Runs once at startup; every failure except a lookup miss is fatal

mod defaults;
pub mod descriptor;
pub mod resolver;

pub use descriptor::DefaultStrategyDescriptor;
pub use resolver::StrategyResolver;

use std::sync::Arc;

use crate::registry::Registry;

/// Error type returned by default factories.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

/// Constructor for a default implementation. The registry is available for
/// implementations that wire further collaborators themselves.
pub type Factory<C> = fn(&Registry) -> Result<Box<C>, FactoryError>;

/// A default implementation compiled into the binary.
pub struct Implementation<C: ?Sized> {
    /// Identifier referenced from the descriptor.
    pub id: &'static str,
    pub create: Factory<C>,
}

/// An abstract role a collaborator fulfils, e.g. the message codec.
pub trait Capability: Send + Sync + 'static {
    /// Key of this capability in the default strategies descriptor.
    const KEY: &'static str;

    /// Default implementations available for this capability.
    fn implementations() -> &'static [Implementation<Self>];
}

/// Outcome of the named-then-default resolution.
pub enum Resolved<C: ?Sized> {
    /// Supplied by the registry under the requested name.
    Named(Arc<C>),
    /// Freshly built from the default strategies; not yet shared with anyone.
    Default(Box<C>),
}

impl<C: ?Sized> Resolved<C> {
    pub fn is_default(&self) -> bool {
        matches!(self, Resolved::Default(_))
    }

    /// Convert into the shared form kept for the controller's lifetime.
    pub fn into_shared(self) -> Arc<C> {
        match self {
            Resolved::Named(shared) => shared,
            Resolved::Default(owned) => Arc::from(owned),
        }
    }
}
