use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_notes::NoteError;
use thiserror::Error;

/// Per-operation errors for the users domain.
///
/// Message texts are part of the API contract and are returned verbatim to
/// callers.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("No users found")]
    NoUsersFound,

    #[error("All fields are required")]
    MissingFields,

    #[error("user ID Required")]
    MissingId,

    /// Username taken at creation time (rejected as a bad request)
    #[error("Username already exists")]
    DuplicateUsername,

    /// Username taken by a different user at update time (rejected as a conflict)
    #[error("Username already exists")]
    UsernameConflict,

    #[error("User not found")]
    NotFound,

    #[error("User has assigned notes")]
    HasAssignedNotes,

    #[error("Invalid user data received")]
    InvalidUserData,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NoUsersFound => AppError::NotFound(err.to_string()),
            UserError::MissingFields
            | UserError::MissingId
            | UserError::DuplicateUsername
            | UserError::NotFound
            | UserError::HasAssignedNotes
            | UserError::InvalidUserData => AppError::BadRequest(err.to_string()),
            UserError::UsernameConflict => AppError::Conflict(err.to_string()),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

impl From<NoteError> for UserError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::Database(msg) => UserError::Database(msg),
        }
    }
}
