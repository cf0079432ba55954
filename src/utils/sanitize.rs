//! Sanitization and shape validation for untrusted text fields.
//!
//! Everything the contact gate puts into an outgoing email or a log line
//! passes through these functions first.

use lettre::Address;
use regex::Regex;
use std::sync::LazyLock;

/// `local@domain.tld` with a top-level part of at least two characters.
static EMAIL_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap());

/// Replaces carriage returns, line feeds and tabs with a single space each.
///
/// Applied to every field before use, so user input can never inject extra
/// header lines into the outgoing email or forge log lines.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_control_chars("Jane\r\nBcc: x@y.z"), "Jane  Bcc: x@y.z");
/// ```
pub fn strip_control_chars(input: &str) -> String {
    input.replace(['\r', '\n', '\t'], " ")
}

/// Truncates to at most `max` characters, never splitting a code point.
pub fn truncate_chars(input: &str, max: usize) -> &str {
    match input.char_indices().nth(max) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Strips control characters, trims, and truncates to `max` characters.
///
/// Trailing whitespace exposed by truncation is trimmed again, which keeps the
/// operation idempotent: `clean_field(clean_field(s, n), n) == clean_field(s, n)`.
pub fn clean_field(input: &str, max: Option<usize>) -> String {
    let stripped = strip_control_chars(input);
    let trimmed = stripped.trim();

    match max {
        Some(max) => truncate_chars(trimmed, max).trim_end().to_string(),
        None => trimmed.to_string(),
    }
}

/// Checks that `email` looks like `local@domain.tld`.
///
/// This is a shape check only; deliverability is never verified.
pub fn is_valid_email_shape(email: &str) -> bool {
    EMAIL_SHAPE_REGEX.is_match(email)
}

/// Checks that `email` can be used as an SMTP address (`Reply-To`).
///
/// Stricter than [`is_valid_email_shape`]: commas, comments, quotes and
/// malformed domains are refused here.
pub fn is_mailbox_address(email: &str) -> bool {
    email.parse::<Address>().is_ok()
}
