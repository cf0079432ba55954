//! Header extraction helpers for the contact gate.

use axum::http::{HeaderMap, HeaderName, header};

/// `X-Forwarded-For`, set by the hosting platform's edge proxy.
pub static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// A header value that was present but not valid visible ASCII.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Header {0} is not valid ASCII")]
pub struct InvalidHeader(pub String);

/// Reads an optional header as a string.
///
/// # Errors
///
/// Returns [`InvalidHeader`] if the header is present but contains
/// non-visible-ASCII bytes.
pub fn optional_header<'a>(
    headers: &'a HeaderMap,
    name: &HeaderName,
) -> Result<Option<&'a str>, InvalidHeader> {
    headers
        .get(name)
        .map(|v| v.to_str().map_err(|_| InvalidHeader(name.to_string())))
        .transpose()
}

/// Returns whether the request declares a JSON body.
///
/// Any `Content-Type` containing `application/json` qualifies, so
/// `application/json; charset=utf-8` is accepted.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
}

/// Extracts the client IP from the first `X-Forwarded-For` entry.
///
/// Returns `None` when the header is missing, unreadable, or its first entry is empty.
///
/// # Examples
///
/// ```ignore
/// // X-Forwarded-For: 203.0.113.7, 10.0.0.1
/// assert_eq!(forwarded_client_ip(&headers).as_deref(), Some("203.0.113.7"));
/// ```
pub fn forwarded_client_ip(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(&X_FORWARDED_FOR)?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();

    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}
