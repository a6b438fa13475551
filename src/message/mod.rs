//! Opaque web service messages and their per-request context.
//!
//! Payloads are carried as raw bytes together with their content type; what is
//! inside them is up to the endpoints.

pub mod factory;

pub use factory::{MessageFactory, RawMessageFactory};

use axum::body::Bytes;

/// A request or response message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebServiceMessage {
    content_type: String,
    payload: Bytes,
}

impl WebServiceMessage {
    pub fn new(content_type: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            payload: payload.into(),
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Payload as UTF-8 text, if it is valid UTF-8.
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }

    pub fn into_parts(self) -> (String, Bytes) {
        (self.content_type, self.payload)
    }
}

/// Exchange state passed to a message receiver.
#[derive(Debug)]
pub struct MessageContext {
    request: WebServiceMessage,
    response: Option<WebServiceMessage>,
}

impl MessageContext {
    pub fn new(request: WebServiceMessage) -> Self {
        Self {
            request,
            response: None,
        }
    }

    pub fn request(&self) -> &WebServiceMessage {
        &self.request
    }

    pub fn response(&self) -> Option<&WebServiceMessage> {
        self.response.as_ref()
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Set the response, replacing any earlier one.
    pub fn set_response(&mut self, response: WebServiceMessage) {
        self.response = Some(response);
    }

    pub fn take_response(&mut self) -> Option<WebServiceMessage> {
        self.response.take()
    }
}
