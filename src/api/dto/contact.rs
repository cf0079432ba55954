//! DTOs for the contact form endpoint.
//!
//! The request body is parsed by the gate itself (see
//! [`crate::domain::entities::SubmissionRequest`]) so that content-type and size
//! checks run before any parsing.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::entities::DeliveryOutcome;
use crate::error::AppError;

/// `{"ok": true}`, returned for every accepted submission, including discarded ones.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl IntoResponse for DeliveryOutcome {
    fn into_response(self) -> Response {
        match self {
            DeliveryOutcome::Accepted(_) => Json(OkResponse { ok: true }).into_response(),
            DeliveryOutcome::Rejected(err) => err.into_response(),
            DeliveryOutcome::TransportUnavailable => {
                AppError::TransportUnavailable.into_response()
            }
        }
    }
}
