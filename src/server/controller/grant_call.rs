use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        grant_call::{CreateGrantCallDto, GrantCallDto, UpdateGrantCallDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::grant_call::{
            self, CreateGrantCallParams, GrantCallFilter, GrantCallStatus, UpdateGrantCallParams,
        },
        service::grant_call::GrantCallService,
        state::AppState,
    },
};

/// Tag for grouping grant call endpoints in OpenAPI documentation
pub static GRANT_CALL_TAG: &str = "grant-call";

/// Query parameters for listing grant calls.
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GrantCallListParams {
    /// Filter by grant type.
    #[serde(rename = "type")]
    pub grant_type: Option<String>,
    /// Only return calls that are open for submissions.
    #[serde(default)]
    pub open_only: bool,
}

/// List grant calls, newest deadline first. Public.
#[utoipa::path(
    get,
    path = "/api/grant-calls",
    tag = GRANT_CALL_TAG,
    params(GrantCallListParams),
    responses(
        (status = 200, description = "Grant calls", body = Vec<GrantCallDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_grant_calls(
    State(state): State<AppState>,
    Query(params): Query<GrantCallListParams>,
) -> Result<impl IntoResponse, AppError> {
    let calls = GrantCallService::new(&state.db)
        .get_all(GrantCallFilter {
            grant_type: params.grant_type,
            open_only: params.open_only,
        })
        .await?;

    Ok(Json(
        calls
            .into_iter()
            .map(grant_call::into_dto)
            .collect::<Vec<_>>(),
    ))
}

/// Get a grant call by id. Public.
#[utoipa::path(
    get,
    path = "/api/grant-calls/{id}",
    tag = GRANT_CALL_TAG,
    params(("id" = i32, Path, description = "Grant call ID")),
    responses(
        (status = 200, description = "Grant call", body = GrantCallDto),
        (status = 404, description = "Grant call not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_grant_call(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let call = GrantCallService::new(&state.db).get_by_id(id).await?;

    Ok(Json(grant_call::into_dto(call)))
}

/// Publish a new grant call. Grants Manager only.
#[utoipa::path(
    post,
    path = "/api/grant-calls",
    tag = GRANT_CALL_TAG,
    request_body = CreateGrantCallDto,
    responses(
        (status = 201, description = "Grant call created", body = GrantCallDto),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_grant_call(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateGrantCallDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let status = match payload.status {
        Some(value) => GrantCallStatus::parse(&value)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid grant call status: {}", value)))?,
        None => GrantCallStatus::Open,
    };

    let created = GrantCallService::new(&state.db)
        .create(CreateGrantCallParams {
            title: payload.title,
            grant_type: payload.grant_type,
            sponsor: payload.sponsor,
            scope: payload.scope,
            status,
            deadline: payload.deadline,
            eligibility: payload.eligibility,
            requirements: payload.requirements,
            visibility: payload.visibility.unwrap_or_else(|| "Public".to_string()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(grant_call::into_dto(created))))
}

/// Update a grant call. Grants Manager only.
#[utoipa::path(
    put,
    path = "/api/grant-calls/{id}",
    tag = GRANT_CALL_TAG,
    params(("id" = i32, Path, description = "Grant call ID")),
    request_body = UpdateGrantCallDto,
    responses(
        (status = 200, description = "Updated grant call", body = GrantCallDto),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Grant call not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_grant_call(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateGrantCallDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = GrantCallService::new(&state.db)
        .update(
            id,
            UpdateGrantCallParams {
                title: payload.title,
                grant_type: payload.grant_type,
                sponsor: payload.sponsor,
                scope: payload.scope,
                status: payload.status,
                deadline: payload.deadline,
                eligibility: payload.eligibility,
                requirements: payload.requirements,
                visibility: payload.visibility,
            },
        )
        .await?;

    Ok(Json(grant_call::into_dto(updated)))
}

/// Flip a grant call between open and closed. Grants Manager only.
#[utoipa::path(
    put,
    path = "/api/grant-calls/{id}/toggle-status",
    tag = GRANT_CALL_TAG,
    params(("id" = i32, Path, description = "Grant call ID")),
    responses(
        (status = 200, description = "Updated grant call", body = GrantCallDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Grant call not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_grant_call_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = GrantCallService::new(&state.db).toggle_status(id).await?;

    Ok(Json(grant_call::into_dto(updated)))
}

/// Delete a grant call. Grants Manager only.
#[utoipa::path(
    delete,
    path = "/api/grant-calls/{id}",
    tag = GRANT_CALL_TAG,
    params(("id" = i32, Path, description = "Grant call ID")),
    responses(
        (status = 204, description = "Grant call deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Grant call not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_grant_call(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    GrantCallService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
