//! Message receiver handler.
//!
//! # Responsibilities
//! - Accept `POST` requests only
//! - Read the body within the configured limit and decode it with the message factory
//! - Run the receiver and write its response message
//!
//! # Design Decisions
//! - No response message from the receiver means `202 Accepted` with an empty body
//! - Last-modified is always unknown: message exchanges are never cacheable

use std::sync::Arc;
use std::time::SystemTime;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;

use crate::error::{ProcessingError, ProcessingResult};
use crate::message::{MessageContext, MessageFactory};
use crate::receiver::MessageReceiver;

/// Adapts HTTP requests to a [`MessageReceiver`].
#[derive(Clone)]
pub struct MessageReceiverHandler {
    message_factory: Arc<dyn MessageFactory>,
    max_body_size: usize,
}

impl MessageReceiverHandler {
    pub fn new(message_factory: Arc<dyn MessageFactory>, max_body_size: usize) -> Self {
        Self {
            message_factory,
            max_body_size,
        }
    }

    pub fn message_factory(&self) -> &Arc<dyn MessageFactory> {
        &self.message_factory
    }

    /// Process one message exchange.
    pub async fn handle(
        &self,
        request: Request<Body>,
        receiver: &dyn MessageReceiver,
    ) -> ProcessingResult<Response> {
        if *request.method() != Method::POST {
            return Err(ProcessingError::MethodNotAllowed {
                method: request.method().clone(),
                allowed: Method::POST,
            });
        }

        let (parts, body) = request.into_parts();
        let content_type = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        let payload = axum::body::to_bytes(body, self.max_body_size)
            .await
            .map_err(|e| self.body_error(e))?;

        let request_message = self.message_factory.create_message(content_type, payload)?;
        let mut context = MessageContext::new(request_message);
        receiver.receive(&mut context)?;

        match context.take_response() {
            Some(response) => {
                let (content_type, payload) = response.into_parts();
                Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], payload).into_response())
            }
            None => Ok(StatusCode::ACCEPTED.into_response()),
        }
    }

    /// Over-limit bodies, whether caught here or by an outer limit layer, become 413.
    fn body_error(&self, error: axum::Error) -> ProcessingError {
        let error = error.into_inner();
        let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(&*error);
        while let Some(current) = cause {
            if current.is::<LengthLimitError>() {
                return ProcessingError::PayloadTooLarge {
                    limit: self.max_body_size,
                };
            }
            cause = current.source();
        }
        ProcessingError::Body(error.to_string())
    }

    pub fn last_modified(&self, _request: &Request<Body>, _receiver: &dyn MessageReceiver) -> Option<SystemTime> {
        None
    }
}
