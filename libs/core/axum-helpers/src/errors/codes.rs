//! Type-safe error codes for API responses.
//!
//! Single source of truth for the error codes carried in [`super::ErrorResponse`]:
//! a string identifier for clients, an integer code for monitoring, and a
//! default human-readable message.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request was malformed or failed a business rule
    BadRequest,

    /// JSON extraction from the request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state
    Conflict,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::BadRequest => 1001,
            ErrorCode::JsonExtraction => 1003,
            ErrorCode::NotFound => 1004,
            ErrorCode::Conflict => 1008,
            ErrorCode::InternalError => 1005,
            ErrorCode::ServiceUnavailable => 1006,
        }
    }

    /// Machine-readable identifier for client parsing.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::JsonExtraction => "JSON_EXTRACTION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Default message used when the caller has nothing more specific.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "Bad request",
            ErrorCode::JsonExtraction => "Invalid JSON in request body",
            ErrorCode::NotFound => "Requested resource was not found",
            ErrorCode::Conflict => "Request conflicts with the current resource state",
            ErrorCode::InternalError => "An unexpected error occurred",
            ErrorCode::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }
}
