//! Mapping of processing errors to HTTP responses.
//!
//! # Design Decisions
//! - Only the hosting layer turns `ProcessingError` into a response; handlers just return it
//! - Client mistakes map to 4xx, endpoint and rendering failures to 500
//! - Error bodies are short plain text, details go to the log

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ProcessingError;

impl ProcessingError {
    /// Status code reported to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProcessingError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ProcessingError::Body(_) | ProcessingError::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            ProcessingError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProcessingError::NoEndpointFound { .. } => StatusCode::NOT_FOUND,
            ProcessingError::Endpoint { .. } | ProcessingError::Wsdl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProcessingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ProcessingError::MethodNotAllowed { allowed, .. } => {
                (status, [(header::ALLOW, allowed.to_string())]).into_response()
            }
            ProcessingError::Endpoint { .. } | ProcessingError::Wsdl(_) => {
                (status, "Message processing failed").into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = ProcessingError::MethodNotAllowed {
            method: Method::GET,
            allowed: Method::POST,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ProcessingError::InvalidMessage("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProcessingError::PayloadTooLarge { limit: 16 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ProcessingError::NoEndpointFound { content_type: "text/xml".into() }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ProcessingError::Endpoint { endpoint: "e".into(), reason: "r".into() }
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
