//! Utility functions for input sanitization and request header handling.
//!
//! - [`sanitize`] - Named validators applied to untrusted contact form fields
//! - [`headers`] - Host, origin and client IP extraction from HTTP headers

pub mod headers;
pub mod sanitize;
