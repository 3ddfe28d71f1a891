use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token was supplied in the Authorization header.
    #[error("Missing bearer token")]
    MissingToken,

    /// The supplied token failed signature validation, expired, or carries
    /// the wrong token type claim.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Login attempted with an unknown email or wrong password.
    ///
    /// Both cases map to the same client-facing message so login attempts
    /// cannot be used to probe for registered accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The token subject no longer resolves to a user in the database.
    #[error("User {0} not found in database")]
    UserNotInDatabase(String),

    /// The account exists but has been deactivated by an administrator.
    #[error("Account is inactive")]
    AccountInactive,

    /// Authenticated user lacks the role required by the endpoint.
    ///
    /// # Fields
    /// - User id
    /// - Description of the denied action for server-side logging
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Token and credential problems map to 401 Unauthorized; role failures map
/// to 403 Forbidden. Denied-access details are logged server-side while the
/// client receives a generic message.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken | Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Not authenticated".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Incorrect email or password".to_string(),
                }),
            )
                .into_response(),
            Self::UserNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "User not found".to_string(),
                }),
            )
                .into_response(),
            Self::AccountInactive => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Account is inactive".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(user_id, ref reason) => {
                tracing::debug!("User {} denied access: {}", user_id, reason);
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "Insufficient permissions".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
