//! Request classification.
//!
//! # Design Decisions
//! - Classification is total: anything that is not a known WSDL document is a message
//! - Only the path is inspected; no percent-decoding, case-sensitive
//! - The document table lookup happens in the controller; this module only
//!   extracts the candidate name

use axum::http::Method;

/// Suffix of WSDL request paths.
pub const WSDL_SUFFIX: &str = ".wsdl";

/// Candidate document name for `GET …/X.wsdl` requests, `None` for everything else.
pub fn wsdl_candidate<'p>(method: &Method, path: &'p str) -> Option<&'p str> {
    if *method == Method::GET && path.ends_with(WSDL_SUFFIX) {
        Some(extract_filename(path))
    } else {
        None
    }
}

/// File name of a URL path without its extension.
///
/// `/services/echo.wsdl` → `echo`. Path parameters (`;…`) and a query string
/// are cut off first.
pub fn extract_filename(path: &str) -> &str {
    let end = path
        .find(';')
        .or_else(|| path.find('?'))
        .unwrap_or(path.len());
    let path = &path[..end];
    let begin = path.rfind('/').map_or(0, |slash| slash + 1);
    let file = &path[begin..];
    match file.rfind('.') {
        Some(dot) => &file[..dot],
        None => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename() {
        assert_eq!(extract_filename("/services/echo.wsdl"), "echo");
        assert_eq!(extract_filename("echo.wsdl"), "echo");
        assert_eq!(extract_filename("/a/b/orders.v2.wsdl"), "orders.v2");
        assert_eq!(extract_filename("/services/echo"), "echo");
        assert_eq!(extract_filename("/services/"), "");
        assert_eq!(extract_filename("/services/echo.wsdl;jsessionid=1"), "echo");
        assert_eq!(extract_filename("/services/echo.wsdl?x=/y"), "echo");
    }

    #[test]
    fn test_candidate_requires_get() {
        for method in [Method::POST, Method::PUT, Method::HEAD, Method::DELETE] {
            assert_eq!(wsdl_candidate(&method, "/services/echo.wsdl"), None);
        }
        assert_eq!(wsdl_candidate(&Method::GET, "/services/echo.wsdl"), Some("echo"));
    }

    #[test]
    fn test_candidate_requires_suffix() {
        assert_eq!(wsdl_candidate(&Method::GET, "/services/echo"), None);
        assert_eq!(wsdl_candidate(&Method::GET, "/services/echo.WSDL"), None);
        assert_eq!(wsdl_candidate(&Method::GET, "/services/echo.wsdl/"), None);
    }
}
