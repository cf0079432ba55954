//! Application error type and its HTTP mapping.
//!
//! Every rejection the API can produce is a variant of [`AppError`]. The
//! response body is always the flat `{"error": "<message>"}` shape the
//! portfolio frontend expects.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Who is at fault for a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input from the caller; reported with a 4xx status.
    Client,
    /// Misconfiguration or third-party outage; reported with a 5xx status.
    Server,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Forbidden origin")]
    ForbiddenOrigin,

    #[error("Unsupported Media Type")]
    UnsupportedMediaType,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Missing captcha token")]
    CaptchaMissing,

    #[error("Captcha verification failed")]
    CaptchaFailed,

    #[error("Captcha verification unavailable")]
    CaptchaUnavailable,

    #[error("Invalid input")]
    InvalidInput,

    #[error("Message too long (max {max})")]
    MessageTooLong { max: usize },

    #[error("Email transport is not configured")]
    TransportUnavailable,

    #[error("Failed to send email")]
    DeliveryFailed,

    /// A status proxy was called without its credentials configured.
    #[error("{0}")]
    NotConfigured(&'static str),

    /// The upstream API answered with a non-success status, which is passed through.
    #[error("{message}")]
    UpstreamStatus { status: u16, message: &'static str },

    #[error("Upstream unavailable")]
    UpstreamUnavailable,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::ForbiddenOrigin | AppError::CaptchaFailed => StatusCode::FORBIDDEN,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::CaptchaMissing | AppError::InvalidInput | AppError::MessageTooLong { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::CaptchaUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::TransportUnavailable
            | AppError::DeliveryFailed
            | AppError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        }
    }

    /// Classifies the error as the caller's fault or the server's.
    pub fn class(&self) -> ErrorClass {
        if self.status_code().is_client_error() {
            ErrorClass::Client
        } else {
            ErrorClass::Server
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
