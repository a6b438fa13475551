//! Endpoints: the units of message processing the dispatcher chooses between.

use crate::error::ProcessingResult;
use crate::message::{MessageContext, WebServiceMessage};

/// A message handler registered in the registry.
pub trait Endpoint: Send + Sync {
    /// Whether this endpoint wants to process the given request message.
    fn supports(&self, request: &WebServiceMessage) -> bool;

    fn invoke(&self, context: &mut MessageContext) -> ProcessingResult<()>;
}

/// Answers every message with a copy of itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoEndpoint;

impl Endpoint for EchoEndpoint {
    fn supports(&self, _request: &WebServiceMessage) -> bool {
        true
    }

    fn invoke(&self, context: &mut MessageContext) -> ProcessingResult<()> {
        let echo = context.request().clone();
        context.set_response(echo);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_copies_request() {
        let request = WebServiceMessage::new("text/xml", "<echo>hi</echo>");
        let mut context = MessageContext::new(request.clone());

        assert!(EchoEndpoint.supports(&request));
        EchoEndpoint.invoke(&mut context).unwrap();
        assert_eq!(context.response(), Some(&request));
    }
}
