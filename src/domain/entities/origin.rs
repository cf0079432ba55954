//! Best-effort origin check for browser submissions.
//!
//! The check blocks cross-site form posts from browsers that send an `Origin`
//! header. It is advisory: a request without the header, or with headers that
//! cannot be read, is let through.

use axum::http::{HeaderMap, header};

use crate::utils::headers::{InvalidHeader, optional_header};

/// Local development servers that are always allowed.
pub const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Inputs to the origin check, borrowed from the request and the gate config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginContext<'a> {
    pub origin: Option<&'a str>,
    pub host: &'a str,
    pub allowed: &'a [String],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginDecision {
    Allow,
    Reject,
}

/// The origin check could not be evaluated. Callers treat this as [`OriginDecision::Allow`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Could not evaluate origin: {0}")]
pub struct OriginParseError(#[from] InvalidHeader);

impl<'a> OriginContext<'a> {
    /// Reads `Origin` and `Host` from the request headers.
    ///
    /// A missing `Host` is treated as an empty host.
    ///
    /// # Errors
    ///
    /// Returns [`OriginParseError`] if either header is not valid ASCII.
    pub fn from_headers(
        headers: &'a HeaderMap,
        allowed: &'a [String],
    ) -> Result<Self, OriginParseError> {
        let origin = optional_header(headers, &header::ORIGIN)?;
        let host = optional_header(headers, &header::HOST)?.unwrap_or_default();

        Ok(Self {
            origin,
            host,
            allowed,
        })
    }

    /// Configured origins, then the request's own host under both schemes,
    /// then the local development servers.
    pub fn allow_list(&self) -> Vec<String> {
        self.allowed
            .iter()
            .cloned()
            .chain([format!("https://{}", self.host), format!("http://{}", self.host)])
            .chain(DEV_ORIGINS.iter().map(|s| s.to_string()))
            .collect()
    }

    /// Rejects only a present, non-empty origin that is not in the allow list.
    pub fn decide(&self) -> OriginDecision {
        match self.origin {
            Some(origin) if !origin.is_empty() => {
                if self.allow_list().iter().any(|allowed| allowed == origin) {
                    OriginDecision::Allow
                } else {
                    OriginDecision::Reject
                }
            }
            _ => OriginDecision::Allow,
        }
    }
}

/// Evaluates the origin check for a request.
///
/// # Errors
///
/// Returns [`OriginParseError`] when the headers cannot be read.
pub fn evaluate_origin(
    headers: &HeaderMap,
    allowed: &[String],
) -> Result<OriginDecision, OriginParseError> {
    Ok(OriginContext::from_headers(headers, allowed)?.decide())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(origin: Option<&'static str>, host: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(origin) = origin {
            headers.insert(header::ORIGIN, HeaderValue::from_static(origin));
        }
        if let Some(host) = host {
            headers.insert(header::HOST, HeaderValue::from_static(host));
        }
        headers
    }

    #[test]
    fn test_missing_origin_allowed() {
        let h = headers(None, Some("portfolio.example"));
        assert_eq!(evaluate_origin(&h, &[]), Ok(OriginDecision::Allow));
    }

    #[test]
    fn test_empty_origin_allowed() {
        let h = headers(Some(""), Some("portfolio.example"));
        assert_eq!(evaluate_origin(&h, &[]), Ok(OriginDecision::Allow));
    }

    #[test]
    fn test_same_host_allowed_both_schemes() {
        let h = headers(Some("https://portfolio.example"), Some("portfolio.example"));
        assert_eq!(evaluate_origin(&h, &[]), Ok(OriginDecision::Allow));

        let h = headers(Some("http://portfolio.example"), Some("portfolio.example"));
        assert_eq!(evaluate_origin(&h, &[]), Ok(OriginDecision::Allow));
    }

    #[test]
    fn test_dev_origins_allowed() {
        for origin in DEV_ORIGINS {
            let mut h = headers(None, Some("portfolio.example"));
            h.insert(header::ORIGIN, HeaderValue::from_static(origin));
            assert_eq!(evaluate_origin(&h, &[]), Ok(OriginDecision::Allow));
        }
    }

    #[test]
    fn test_configured_origin_allowed() {
        let allowed = vec!["https://www.portfolio.example".to_string()];
        let h = headers(
            Some("https://www.portfolio.example"),
            Some("api.portfolio.example"),
        );
        assert_eq!(evaluate_origin(&h, &allowed), Ok(OriginDecision::Allow));
    }

    #[test]
    fn test_foreign_origin_rejected() {
        let allowed = vec!["https://www.portfolio.example".to_string()];
        let h = headers(Some("https://evil.example"), Some("portfolio.example"));
        assert_eq!(evaluate_origin(&h, &allowed), Ok(OriginDecision::Reject));
    }

    #[test]
    fn test_missing_host_still_checks_origin() {
        let h = headers(Some("https://evil.example"), None);
        assert_eq!(evaluate_origin(&h, &[]), Ok(OriginDecision::Reject));
    }

    #[test]
    fn test_unreadable_origin_is_parse_error() {
        let mut h = headers(None, Some("portfolio.example"));
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE]) {
            h.insert(header::ORIGIN, value);
            assert!(evaluate_origin(&h, &[]).is_err());
        }
    }

    #[test]
    fn test_allow_list_order() {
        let allowed = vec!["https://a.example".to_string()];
        let ctx = OriginContext {
            origin: None,
            host: "h.example",
            allowed: &allowed,
        };
        assert_eq!(
            ctx.allow_list(),
            vec![
                "https://a.example",
                "https://h.example",
                "http://h.example",
                "http://localhost:5173",
                "http://localhost:3000",
            ]
        );
    }
}
