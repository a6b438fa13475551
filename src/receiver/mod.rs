//! Message receiver capability.
//!
//! # Responsibilities
//! - Define the contract between the HTTP handler and message processing
//! - Provide the default receiver (`MessageDispatcher`) and endpoint contract
//!
//! # Design Decisions
//! - Receivers are synchronous; the HTTP handler has already buffered the body
//! - Name awareness is an optional hook, only applied to default-built receivers

pub mod dispatcher;
pub mod endpoint;

pub use dispatcher::MessageDispatcher;
pub use endpoint::{EchoEndpoint, Endpoint};

use crate::error::ProcessingResult;
use crate::message::MessageContext;

/// Processes a request message and optionally sets a response on the context.
pub trait MessageReceiver: Send + Sync {
    fn receive(&self, context: &mut MessageContext) -> ProcessingResult<()>;

    /// Name of the owning controller, for receivers that keep it.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Access to the name hook, for receivers that want to know their owner.
    fn as_name_aware(&mut self) -> Option<&mut dyn NameAware> {
        None
    }
}

/// Objects that accept the logical name of the controller that owns them.
pub trait NameAware {
    fn set_name(&mut self, name: &str);
}
