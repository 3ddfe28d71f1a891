use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        user::{BiodataDto, CreateUserDto, PasswordResetDto, UpdateUserDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::{self, biodata_from_dto, biodata_to_dto, Role, UpdateUserParams},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Create a new user account. Admin only.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid role or duplicate email", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Admin role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let role = Role::parse(&payload.role)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid role: {}", payload.role)))?;

    let created = UserService::new(&state.db)
        .create(payload.name, payload.email, &payload.password, role)
        .await?;

    Ok((StatusCode::CREATED, Json(user::into_dto(created))))
}

/// List all users. Admin only.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users", body = Vec<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Admin role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let users = UserService::new(&state.db).get_all().await?;

    Ok(Json(
        users.into_iter().map(user::into_dto).collect::<Vec<_>>(),
    ))
}

/// Get a user by id. Admin only.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User record", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Admin role", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let found = UserService::new(&state.db).get_by_id(id).await?;

    Ok(Json(user::into_dto(found)))
}

/// Update a user's name, role, or status. Admin only.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Invalid role or status", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Admin role", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let role = match payload.role {
        Some(value) => Some(
            Role::parse(&value)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid role: {}", value)))?,
        ),
        None => None,
    };
    if let Some(status) = &payload.status {
        if status != user::STATUS_ACTIVE && status != user::STATUS_DISABLED {
            return Err(AppError::BadRequest(format!("Invalid status: {}", status)));
        }
    }

    let updated = UserService::new(&state.db)
        .update(
            id,
            UpdateUserParams {
                name: payload.name,
                role,
                status: payload.status,
            },
        )
        .await?;

    Ok(Json(user::into_dto(updated)))
}

/// Delete a user. Admin only.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Admin role", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Reset a user's password to a generated temporary value. Admin only.
///
/// The plaintext temporary password is returned exactly once.
#[utoipa::path(
    post,
    path = "/api/users/{id}/reset-password",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Temporary password issued", body = PasswordResetDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Admin role", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let temporary_password = UserService::new(&state.db).reset_password(id).await?;

    Ok(Json(PasswordResetDto {
        message: "Password has been reset".to_string(),
        temporary_password,
    }))
}

/// Get the caller's biodata profile.
#[utoipa::path(
    get,
    path = "/api/users/me/biodata",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Stored biodata, or an empty profile", body = BiodataDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_biodata(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;

    Ok(Json(
        account.biodata.map(biodata_to_dto).unwrap_or_default(),
    ))
}

/// Replace the caller's biodata profile.
#[utoipa::path(
    put,
    path = "/api/users/me/biodata",
    tag = USER_TAG,
    request_body = BiodataDto,
    responses(
        (status = 200, description = "Updated biodata", body = BiodataDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_biodata(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BiodataDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;

    let updated = UserService::new(&state.db)
        .update_biodata(account.id, biodata_from_dto(payload))
        .await?;

    Ok(Json(
        updated.biodata.map(biodata_to_dto).unwrap_or_default(),
    ))
}
