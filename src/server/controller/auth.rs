use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{LoginDto, LoginResponseDto, RefreshRequestDto, TokenPairDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::user,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

const TOKEN_TYPE_BEARER: &str = "bearer";

/// Log in with email and password.
///
/// Verifies credentials and returns an access/refresh token pair together
/// with the user record. Disabled accounts are refused.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Successfully logged in", body = LoginResponseDto),
        (status = 401, description = "Incorrect email or password", body = ErrorDto),
        (status = 403, description = "Account is inactive", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.tokens);

    let (account, pair) = service.login(&payload.email, &payload.password).await?;

    tracing::info!("User {} logged in", account.id);

    Ok(Json(LoginResponseDto {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        user: user::into_dto(account),
    }))
}

/// Exchange a refresh token for a new token pair.
///
/// Access tokens are rejected here; only tokens carrying the `refresh` type
/// claim are accepted.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshRequestDto,
    responses(
        (status = 200, description = "New token pair issued", body = TokenPairDto),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.tokens);

    let (_, pair) = service.refresh(&payload.refresh_token).await?;

    Ok(Json(TokenPairDto {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
    }))
}

/// Stateless logout acknowledgement.
///
/// Tokens are self-contained, so logout is client-side token disposal; the
/// endpoint exists for the frontend's logout flow.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
    ),
)]
pub async fn logout() -> impl IntoResponse {
    Json(MessageDto {
        message: "Successfully logged out".to_string(),
    })
}

/// Get the currently authenticated user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;

    Ok(Json(user::into_dto(account)))
}
