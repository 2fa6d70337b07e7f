use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user ID is stored in the session.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("No user in session")]
    NotAuthenticated,

    /// The session references a user that no longer exists.
    ///
    /// Results in a 401 Unauthorized response so the client logs in again.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// Email/password pair did not match a user.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The user is authenticated but lacks a required permission.
    ///
    /// Results in a 403 Forbidden response. The reason is only logged.
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `NotAuthenticated` / `UserNotInDatabase` → 401 Unauthorized with "Not authenticated"
/// - `InvalidCredentials` → 401 Unauthorized with "Invalid email or password"
/// - `AccessDenied` → 403 Forbidden with "Access denied"
///
/// Errors are logged at debug level while keeping client-facing messages generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotAuthenticated | Self::UserNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto::new("Not authenticated")),
            )
                .into_response(),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto::new("Invalid email or password")),
            )
                .into_response(),
            Self::AccessDenied(_, _) => {
                (StatusCode::FORBIDDEN, Json(ErrorDto::new("Access denied"))).into_response()
            }
        }
    }
}
