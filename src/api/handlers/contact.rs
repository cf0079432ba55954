//! Handler for the contact form endpoint.

use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::application::services::ContactRequest;
use crate::state::AppState;

/// Validates a contact form submission and emails it to the site owner.
///
/// # Endpoint
///
/// `/api/send-email` (routed for every method; anything but `POST` gets 405
/// from the gate so the error body keeps the usual shape)
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Jane",
///   "email": "jane@example.com",
///   "message": "Hi!",
///   "hp": "",
///   "turnstileToken": "0.abc..."
/// }
/// ```
///
/// # Response Codes
///
/// - **200** `{"ok": true}`: sent, or silently discarded by the honeypot
/// - **400**: missing captcha token, invalid input, message too long
/// - **403**: forbidden origin, captcha verification failed
/// - **405**, **413**, **415**: wrong method, body over 5000 bytes, not JSON
/// - **500**: email transport not configured, or sending failed
/// - **503**: captcha verifier unreachable
pub async fn send_email_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    // An over-cap body is reported by the gate, after the method, origin and
    // content-type checks.
    let body = match body {
        Ok(body) => Some(body),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => None,
        Err(rejection) => {
            debug!(error = %rejection, "Failed to read contact body");
            return rejection.into_response();
        }
    };

    let request = ContactRequest {
        method,
        headers,
        body,
    };

    state.contact_service.submit(&request).await.into_response()
}
