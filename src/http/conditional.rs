//! Conditional GET support.
//!
//! # Flow
//! ```text
//! last_modified = controller.last_modified(request)
//!     None                        → serve (always stale)
//!     Some(t), If-Modified-Since >= t (whole seconds) → 304 Not Modified
//!     Some(t), otherwise          → serve with Last-Modified: t
//! ```

use std::time::SystemTime;

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Outcome of comparing a resource timestamp with the request's validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No timestamp known; the resource is always served.
    Unknown,
    /// The client's copy is current.
    NotModified,
    /// Serve the resource; it was last modified at the given time.
    Modified(SystemTime),
}

/// Compare `last_modified` against `If-Modified-Since`.
pub fn evaluate(last_modified: Option<SystemTime>, headers: &HeaderMap) -> Freshness {
    let Some(last_modified) = last_modified else {
        return Freshness::Unknown;
    };

    let if_modified_since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date);

    match if_modified_since {
        Some(since) if since >= DateTime::<Utc>::from(last_modified).timestamp() => Freshness::NotModified,
        _ => Freshness::Modified(last_modified),
    }
}

/// Format a timestamp as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`).
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// The `Last-Modified` header value for `time`.
pub fn last_modified_header(time: SystemTime) -> Option<HeaderValue> {
    HeaderValue::from_str(&format_http_date(time)).ok()
}

/// Obsolete HTTP date formats that recipients must still accept.
const OBSOLETE_DATE_FORMATS: &[&str] = &[
    // RFC 850: Sunday, 06-Nov-94 08:49:37 GMT
    "%A, %d-%b-%y %H:%M:%S GMT",
    // asctime: Sun Nov  6 08:49:37 1994
    "%a %b %e %H:%M:%S %Y",
];

/// Parse an HTTP date into seconds since the epoch.
fn parse_http_date(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.timestamp());
    }
    OBSOLETE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|date| date.and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Sun, 06 Nov 1994 08:49:37 GMT
    const STAMP_SECS: u64 = 784_111_777;

    fn stamp(millis_extra: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(STAMP_SECS * 1000 + millis_extra)
    }

    fn headers(if_modified_since: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_MODIFIED_SINCE, HeaderValue::from_str(if_modified_since).unwrap());
        headers
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(stamp(0)), "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(format_http_date(stamp(999)), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_unknown_timestamp_always_served() {
        assert_eq!(evaluate(None, &headers("Sun, 06 Nov 1994 08:49:37 GMT")), Freshness::Unknown);
    }

    #[test]
    fn test_no_validator_is_modified() {
        assert_eq!(evaluate(Some(stamp(0)), &HeaderMap::new()), Freshness::Modified(stamp(0)));
    }

    #[test]
    fn test_same_second_is_not_modified() {
        let validator = headers("Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(evaluate(Some(stamp(0)), &validator), Freshness::NotModified);
        assert_eq!(evaluate(Some(stamp(500)), &validator), Freshness::NotModified);
    }

    #[test]
    fn test_newer_resource_is_modified() {
        let validator = headers("Sun, 06 Nov 1994 08:49:36 GMT");
        assert_eq!(evaluate(Some(stamp(0)), &validator), Freshness::Modified(stamp(0)));
    }

    #[test]
    fn test_obsolete_date_formats_accepted() {
        for validator in ["Sunday, 06-Nov-94 08:49:37 GMT", "Sun Nov  6 08:49:37 1994"] {
            assert_eq!(parse_http_date(validator), Some(STAMP_SECS as i64), "{validator}");
            assert_eq!(evaluate(Some(stamp(0)), &headers(validator)), Freshness::NotModified);
        }
        assert_eq!(
            evaluate(Some(stamp(0)), &headers("Sunday, 06-Nov-94 08:49:36 GMT")),
            Freshness::Modified(stamp(0))
        );
    }

    #[test]
    fn test_malformed_validator_ignored() {
        let validator = headers("yesterday-ish");
        assert_eq!(evaluate(Some(stamp(0)), &validator), Freshness::Modified(stamp(0)));
    }
}
