//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → conditional.rs (If-Modified-Since vs. controller.last_modified)
//!     → FrontController::service
//!     → response.rs (ProcessingError → status code)
//!     → Send to client
//! ```

pub mod conditional;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
