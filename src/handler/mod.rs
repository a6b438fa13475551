//! Request handlers the front controller delegates to.
//!
//! # Data Flow
//! ```text
//! FrontController
//!     → receiver.rs   POST body → MessageFactory → MessageReceiver → response message
//!     → wsdl.rs       GET X.wsdl → WsdlDefinition source (locations optionally rewritten)
//! ```
//!
//! # Design Decisions
//! - Handlers own no per-request state; both are shared read-only after startup
//! - Handlers return `ProcessingError` and never build error responses themselves
//! - Each handler also answers the last-modified query for its kind of request

pub mod receiver;
pub mod wsdl;

pub use receiver::MessageReceiverHandler;
pub use wsdl::WsdlDefinitionHandler;
