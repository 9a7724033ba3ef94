//! Response types for the decoder API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, LineError};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<LineError> for ApiErrorResponse {
    fn from(error: LineError) -> Self {
        let code = match &error.error {
            DecodeError::MalformedRecord { .. } => "MALFORMED_RECORD",
            DecodeError::EmptyBlock => "EMPTY_BLOCK",
            DecodeError::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            DecodeError::UnrecognizedTag { .. } => "UNRECOGNIZED_TAG",
            DecodeError::InvalidField { .. } => "INVALID_FIELD",
            DecodeError::ConfigNotFound { .. }
            | DecodeError::ConfigParseError { .. }
            | DecodeError::Io { .. }
            | DecodeError::UnknownEncoding { .. } => "DECODE_ERROR",
        };

        ApiErrorResponse {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: ApiError::with_details(code, error.to_string(), error.raw_text),
        }
    }
}
