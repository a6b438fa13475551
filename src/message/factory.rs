//! Message codec capability and its default implementation.

use axum::body::Bytes;

use crate::error::{ProcessingError, ProcessingResult};
use crate::message::WebServiceMessage;
use crate::registry::Registry;
use crate::strategy::FactoryError;

/// Content type used when a request does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Creates messages from raw request payloads.
pub trait MessageFactory: Send + Sync {
    /// Build a request message. `content_type` is the request's `Content-Type` header, if any.
    fn create_message(&self, content_type: Option<&str>, payload: Bytes) -> ProcessingResult<WebServiceMessage>;
}

/// Wraps payload bytes without interpreting them.
#[derive(Debug, Clone)]
pub struct RawMessageFactory {
    default_content_type: String,
}

impl RawMessageFactory {
    /// Identifier used in the default strategies descriptor.
    pub const ID: &'static str = "message_dispatcher::message::RawMessageFactory";

    pub fn new(default_content_type: impl Into<String>) -> Self {
        Self {
            default_content_type: default_content_type.into(),
        }
    }

    pub(crate) fn create_default(_registry: &Registry) -> Result<Box<dyn MessageFactory>, FactoryError> {
        Ok(Box::new(Self::default()))
    }
}

impl Default for RawMessageFactory {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_TYPE)
    }
}

impl MessageFactory for RawMessageFactory {
    fn create_message(&self, content_type: Option<&str>, payload: Bytes) -> ProcessingResult<WebServiceMessage> {
        if payload.is_empty() {
            return Err(ProcessingError::InvalidMessage("empty payload".into()));
        }
        let content_type = content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(&self.default_content_type);
        Ok(WebServiceMessage::new(content_type, payload))
    }
}
