//! Contact form submission, before and after sanitization.

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::utils::sanitize::{clean_field, is_mailbox_address, is_valid_email_shape};

/// Maximum raw request body size, in bytes.
pub const MAX_BODY_BYTES: usize = 5000;
/// Maximum sanitized name length, in characters.
pub const MAX_NAME_CHARS: usize = 100;
/// Maximum sanitized email length, in characters.
pub const MAX_EMAIL_CHARS: usize = 200;
/// Maximum sanitized message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Raw contact form payload as sent by the browser.
///
/// Every field is untrusted. Missing and `null` fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,

    /// Hidden form field that humans never fill in.
    #[serde(rename = "hp", default, deserialize_with = "null_as_empty")]
    pub honeypot: String,

    #[serde(rename = "turnstileToken", default, deserialize_with = "null_as_empty")]
    pub captcha_token: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SubmissionRequest {
    /// Parses a JSON body. An empty body is treated as `{}`.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the body is not an object of string fields.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// Returns true if the honeypot field holds anything besides whitespace.
    pub fn is_honeypot_triggered(&self) -> bool {
        !self.honeypot.trim().is_empty()
    }

    /// The CAPTCHA token, or `None` if it is empty or whitespace.
    pub fn captcha_token(&self) -> Option<&str> {
        let token = self.captcha_token.trim();
        (!token.is_empty()).then_some(token)
    }
}

/// Contact form fields after control-character stripping, trimming and truncation.
///
/// Built only through [`SanitizedMessage::from_submission`]; the message is not
/// truncated, so its length limit can be enforced separately.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SanitizedMessage {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub message: String,
}

fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if is_valid_email_shape(email) && is_mailbox_address(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email_shape"))
    }
}

impl SanitizedMessage {
    pub fn from_submission(submission: &SubmissionRequest) -> Self {
        Self {
            name: clean_field(&submission.name, Some(MAX_NAME_CHARS)),
            email: clean_field(&submission.email, Some(MAX_EMAIL_CHARS)),
            message: clean_field(&submission.message, None),
        }
    }

    /// Rejects messages longer than [`MAX_MESSAGE_CHARS`] characters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MessageTooLong`].
    pub fn check_length(&self) -> Result<(), AppError> {
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(AppError::MessageTooLong {
                max: MAX_MESSAGE_CHARS,
            });
        }
        Ok(())
    }

    /// Renders the notification email for this message.
    pub fn to_email(&self) -> OutboundEmail {
        OutboundEmail {
            subject: format!("New message from {} via portfolio", self.name),
            reply_to: self.email.clone(),
            body: format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}",
                self.name, self.email, self.message
            ),
        }
    }
}

/// The email sent for an accepted submission.
///
/// Sender and recipient come from the transport configuration, never from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub subject: String,
    pub reply_to: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> SubmissionRequest {
        SubmissionRequest {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let parsed = SubmissionRequest::from_json(br#"{"name":"Jane"}"#).unwrap();
        assert_eq!(parsed.name, "Jane");
        assert_eq!(parsed.email, "");
        assert_eq!(parsed.honeypot, "");
        assert_eq!(parsed.captcha_token, "");
    }

    #[test]
    fn test_from_json_wire_names() {
        let parsed = SubmissionRequest::from_json(
            br#"{"name":"Jane","email":"jane@x.com","message":"Hi","hp":"","turnstileToken":"tok"}"#,
        )
        .unwrap();
        assert_eq!(parsed.captcha_token, "tok");
        assert_eq!(parsed.honeypot, "");
        assert_eq!(parsed.message, "Hi");
    }

    #[test]
    fn test_from_json_null_and_empty_body() {
        let parsed = SubmissionRequest::from_json(br#"{"name":null,"hp":null}"#).unwrap();
        assert_eq!(parsed, SubmissionRequest::default());

        assert_eq!(
            SubmissionRequest::from_json(b"").unwrap(),
            SubmissionRequest::default()
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SubmissionRequest::from_json(b"not json").is_err());
        assert!(SubmissionRequest::from_json(br#"{"name": 42}"#).is_err());
    }

    #[test]
    fn test_honeypot() {
        let mut s = SubmissionRequest::default();
        assert!(!s.is_honeypot_triggered());

        s.honeypot = "   \t".to_string();
        assert!(!s.is_honeypot_triggered());

        s.honeypot = "http://spam.example".to_string();
        assert!(s.is_honeypot_triggered());
    }

    #[test]
    fn test_captcha_token() {
        let mut s = SubmissionRequest::default();
        assert_eq!(s.captcha_token(), None);

        s.captcha_token = "  ".to_string();
        assert_eq!(s.captcha_token(), None);

        s.captcha_token = " abc ".to_string();
        assert_eq!(s.captcha_token(), Some("abc"));
    }

    #[test]
    fn test_sanitize_strips_and_truncates() {
        let long_name = format!("  {}\r\n", "n".repeat(120));
        let sanitized = SanitizedMessage::from_submission(&submission(
            &long_name,
            "\tjane@x.com\n",
            "line one\nline two",
        ));

        assert_eq!(sanitized.name, "n".repeat(100));
        assert_eq!(sanitized.email, "jane@x.com");
        assert_eq!(sanitized.message, "line one line two");
    }

    #[test]
    fn test_sanitize_does_not_truncate_message() {
        let sanitized = SanitizedMessage::from_submission(&submission(
            "Jane",
            "jane@x.com",
            &"m".repeat(800),
        ));
        assert_eq!(sanitized.message.chars().count(), 800);
    }

    #[test]
    fn test_sanitize_idempotent() {
        let raw = submission(
            &format!("{} Smith\tJr", "J".repeat(99)),
            " jane@x.com\r\n",
            "\nHello\r\nthere\t",
        );
        let once = SanitizedMessage::from_submission(&raw);
        let twice = SanitizedMessage::from_submission(&submission(
            &once.name,
            &once.email,
            &once.message,
        ));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_validate() {
        let ok = SanitizedMessage::from_submission(&submission("Jane", "jane@x.com", "Hi"));
        assert!(ok.validate().is_ok());

        let no_name = SanitizedMessage::from_submission(&submission(" \n", "jane@x.com", "Hi"));
        assert!(no_name.validate().is_err());

        let bad_email = SanitizedMessage::from_submission(&submission("Jane", "bad", "Hi"));
        assert!(bad_email.validate().is_err());

        let no_message = SanitizedMessage::from_submission(&submission("Jane", "a@b.co", "\t"));
        assert!(no_message.validate().is_err());

        let unsendable =
            SanitizedMessage::from_submission(&submission("Jane", "jane,doe@x.com", "Hi"));
        assert!(unsendable.validate().is_err());
    }

    #[test]
    fn test_length_boundary() {
        let at_limit =
            SanitizedMessage::from_submission(&submission("Jane", "a@b.co", &"x".repeat(500)));
        assert!(at_limit.check_length().is_ok());

        let over_limit =
            SanitizedMessage::from_submission(&submission("Jane", "a@b.co", &"x".repeat(501)));
        assert!(matches!(
            over_limit.check_length(),
            Err(AppError::MessageTooLong { max: 500 })
        ));
    }

    #[test]
    fn test_length_counts_characters() {
        let multibyte =
            SanitizedMessage::from_submission(&submission("Jane", "a@b.co", &"é".repeat(500)));
        assert!(multibyte.check_length().is_ok());
    }

    #[test]
    fn test_to_email() {
        let email =
            SanitizedMessage::from_submission(&submission("Jane", "jane@x.com", "Hi")).to_email();

        assert_eq!(email.subject, "New message from Jane via portfolio");
        assert_eq!(email.reply_to, "jane@x.com");
        assert_eq!(email.body, "Name: Jane\nEmail: jane@x.com\n\nMessage:\nHi");
    }
}
