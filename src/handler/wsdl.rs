//! WSDL definition handler.

use std::time::SystemTime;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::error::{ProcessingError, ProcessingResult};
use crate::wsdl::{transform::transform_locations, WsdlDefinition};

/// Content type of served WSDL documents.
pub const WSDL_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Serves [`WsdlDefinition`] documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsdlDefinitionHandler {
    transform_locations: bool,
}

impl WsdlDefinitionHandler {
    /// `transform_locations` rewrites relative `location` attributes to the request URL.
    pub fn new(transform_locations: bool) -> Self {
        Self { transform_locations }
    }

    pub fn transform_locations(&self) -> bool {
        self.transform_locations
    }

    pub fn handle(&self, request: &Request<Body>, definition: &dyn WsdlDefinition) -> ProcessingResult<Response> {
        if *request.method() != Method::GET {
            return Err(ProcessingError::MethodNotAllowed {
                method: request.method().clone(),
                allowed: Method::GET,
            });
        }

        let mut source = definition.source()?;
        if self.transform_locations {
            let base = request_url(request)?;
            source = transform_locations(&source, &base);
        }

        Ok((StatusCode::OK, [(header::CONTENT_TYPE, WSDL_CONTENT_TYPE)], source).into_response())
    }

    pub fn last_modified(&self, _request: &Request<Body>, definition: &dyn WsdlDefinition) -> Option<SystemTime> {
        definition.last_modified()
    }
}

/// Reconstruct the URL the client used, honouring `X-Forwarded-Proto`.
fn request_url(request: &Request<Body>) -> ProcessingResult<Url> {
    let header_str = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let scheme = header_str("x-forwarded-proto")
        .or_else(|| request.uri().scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());
    let host = header_str(header::HOST.as_str())
        .or_else(|| request.uri().authority().map(|a| a.to_string()))
        .ok_or_else(|| ProcessingError::Wsdl("request carries no host".into()))?;

    let url = format!("{}://{}{}", scheme, host, request.uri().path());
    Url::parse(&url).map_err(|e| ProcessingError::Wsdl(format!("invalid request URL {url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wsdl::SimpleWsdlDefinition;
    use std::time::Duration;

    const SOURCE: &str = r#"<definitions><soap:address location="/services/echo"/></definitions>"#;

    fn get(host: &str) -> Request<Body> {
        Request::builder()
            .uri("/services/echo.wsdl")
            .header(header::HOST, host)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_source_unchanged_by_default() {
        let handler = WsdlDefinitionHandler::default();
        let response = handler
            .handle(&get("localhost:8080"), &SimpleWsdlDefinition::new(SOURCE))
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], WSDL_CONTENT_TYPE);
        assert_eq!(body_text(response).await, SOURCE);
    }

    #[tokio::test]
    async fn test_transforms_locations_to_request_host() {
        let handler = WsdlDefinitionHandler::new(true);
        let mut request = get("ws.example.com:9000");
        request
            .headers_mut()
            .insert("x-forwarded-proto", "https".parse().unwrap());

        let response = handler.handle(&request, &SimpleWsdlDefinition::new(SOURCE)).unwrap();
        assert_eq!(
            body_text(response).await,
            r#"<definitions><soap:address location="https://ws.example.com:9000/services/echo"/></definitions>"#
        );
    }

    #[test]
    fn test_transform_requires_host() {
        let handler = WsdlDefinitionHandler::new(true);
        let request = Request::builder().uri("/echo.wsdl").body(Body::empty()).unwrap();

        let err = handler.handle(&request, &SimpleWsdlDefinition::new(SOURCE)).err().unwrap();
        assert!(matches!(err, ProcessingError::Wsdl(_)));
    }

    #[test]
    fn test_post_not_allowed() {
        let handler = WsdlDefinitionHandler::default();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/echo.wsdl")
            .body(Body::empty())
            .unwrap();

        let err = handler.handle(&request, &SimpleWsdlDefinition::new(SOURCE)).err().unwrap();
        assert!(matches!(err, ProcessingError::MethodNotAllowed { .. }));
    }

    #[test]
    fn test_last_modified_from_definition() {
        let handler = WsdlDefinitionHandler::default();
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(42);

        let stamped = SimpleWsdlDefinition::new(SOURCE).with_last_modified(stamp);
        assert_eq!(handler.last_modified(&get("h"), &stamped), Some(stamp));
        assert_eq!(handler.last_modified(&get("h"), &SimpleWsdlDefinition::new(SOURCE)), None);
    }
}
