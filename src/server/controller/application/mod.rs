pub mod award;
pub mod signoff;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        application::{
            ApplicationDto, ContractUploadDto, CreateApplicationDto, ReviewCreateDto,
            StatusUpdateDto, UpdateApplicationDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            application::{self, ApplicationFilter, CreateApplicationParams, UpdateApplicationParams},
            user::{parse_role, Role},
        },
        service::application::ApplicationService,
        state::AppState,
    },
};

/// Tag for grouping application endpoints in OpenAPI documentation
pub static APPLICATION_TAG: &str = "application";

/// Query parameters for listing applications.
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListParams {
    /// Filter by application status.
    pub status: Option<String>,
    /// Filter by the grant call applied to.
    pub grant_call_id: Option<i32>,
}

/// Submit a new application to an open grant call.
///
/// The applicant identity is taken from the authenticated user, not the
/// payload, and the grant call deadline is snapshotted onto the application.
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    request_body = CreateApplicationDto,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationDto),
        (status = 400, description = "Grant call closed or past its deadline", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Grant call not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;

    let created = ApplicationService::new(&state.db)
        .submit(CreateApplicationParams::from_dto(payload, &account))
        .await?;

    tracing::info!(
        "User {} submitted application {} to grant call {}",
        account.id,
        created.id,
        created.grant_call_id
    );

    Ok((StatusCode::CREATED, Json(application::into_dto(created))))
}

/// List the caller's own applications.
#[utoipa::path(
    get,
    path = "/api/applications/my",
    tag = APPLICATION_TAG,
    params(ApplicationListParams),
    responses(
        (status = 200, description = "The caller's applications", body = Vec<ApplicationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_applications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ApplicationListParams>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;

    let applications = ApplicationService::new(&state.db)
        .get_visible(
            &account,
            Role::Researcher,
            ApplicationFilter {
                status: params.status,
                grant_call_id: params.grant_call_id,
                email: None,
            },
        )
        .await?;

    Ok(Json(
        applications
            .into_iter()
            .map(application::into_dto)
            .collect::<Vec<_>>(),
    ))
}

/// List applications visible to the caller.
///
/// Researchers see their own submissions; managers and admins see all.
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    params(ApplicationListParams),
    responses(
        (status = 200, description = "Visible applications", body = Vec<ApplicationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_applications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ApplicationListParams>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let applications = ApplicationService::new(&state.db)
        .get_visible(
            &account,
            role,
            ApplicationFilter {
                status: params.status,
                grant_call_id: params.grant_call_id,
                email: None,
            },
        )
        .await?;

    Ok(Json(
        applications
            .into_iter()
            .map(application::into_dto)
            .collect::<Vec<_>>(),
    ))
}

/// Get an application by id. Owner, manager, or admin.
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application", body = ApplicationDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let found = ApplicationService::new(&state.db)
        .get_authorized(id, &account, role)
        .await?;

    Ok(Json(application::into_dto(found)))
}

/// Update an application's editable fields. Owner, manager, or admin.
#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = UpdateApplicationDto,
    responses(
        (status = 200, description = "Updated application", body = ApplicationDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let updated = ApplicationService::new(&state.db)
        .update(id, &account, role, UpdateApplicationParams::from_dto(payload))
        .await?;

    Ok(Json(application::into_dto(updated)))
}

/// Move an application to a new status.
///
/// Transitions outside the workflow table are refused; researchers may only
/// resubmit their own returned applications through this endpoint.
#[utoipa::path(
    put,
    path = "/api/applications/{id}/status",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = StatusUpdateDto,
    responses(
        (status = 200, description = "Updated application", body = ApplicationDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<StatusUpdateDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let updated = ApplicationService::new(&state.db)
        .transition(id, &account, role, &payload.status, payload.comments)
        .await?;

    tracing::info!("Application {} moved to {}", updated.id, updated.status);

    Ok(Json(application::into_dto(updated)))
}

/// Withdraw the caller's own application.
///
/// Only allowed from pre-decision states and before the grant call
/// deadline.
#[utoipa::path(
    put,
    path = "/api/applications/{id}/withdraw",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Withdrawn application", body = ApplicationDto),
        (status = 400, description = "Not withdrawable", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn withdraw_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;

    let updated = ApplicationService::new(&state.db)
        .withdraw(id, &account)
        .await?;

    Ok(Json(application::into_dto(updated)))
}

/// Resubmit a returned application.
///
/// Bumps the revision count and refreshes the submission date while keeping
/// the original submission date.
#[utoipa::path(
    put,
    path = "/api/applications/{id}/resubmit",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Resubmitted application", body = ApplicationDto),
        (status = 400, description = "Not in a resubmittable status", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resubmit_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let updated = ApplicationService::new(&state.db)
        .resubmit(id, &account, role)
        .await?;

    Ok(Json(application::into_dto(updated)))
}

/// Record reviewer feedback on an application. Grants Manager only.
///
/// Optionally transitions the status together with the feedback entry.
#[utoipa::path(
    post,
    path = "/api/applications/{id}/review",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = ReviewCreateDto,
    responses(
        (status = 200, description = "Updated application", body = ApplicationDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<ReviewCreateDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = ApplicationService::new(&state.db)
        .add_review(
            id,
            payload.reviewer_name,
            payload.reviewer_email,
            payload.comments,
            payload.status.as_deref(),
        )
        .await?;

    Ok(Json(application::into_dto(updated)))
}

/// Record the signed contract for an accepted award. Grants Manager only.
#[utoipa::path(
    post,
    path = "/api/applications/{id}/contract",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = ContractUploadDto,
    responses(
        (status = 200, description = "Updated application", body = ApplicationDto),
        (status = 400, description = "No contract is pending", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_contract(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<ContractUploadDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = ApplicationService::new(&state.db)
        .upload_contract(id, payload.file_name)
        .await?;

    Ok(Json(application::into_dto(updated)))
}

/// Download the stored proposal file. Owner, manager, or admin.
#[utoipa::path(
    get,
    path = "/api/applications/{id}/document/{filename}",
    tag = APPLICATION_TAG,
    params(
        ("id" = i32, Path, description = "Application ID"),
        ("filename" = String, Path, description = "Stored proposal file name")
    ),
    responses(
        (status = 200, description = "File content", body = Vec<u8>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "No such file on this application", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_proposal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, filename)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let (content_type, bytes) = ApplicationService::new(&state.db)
        .proposal_file(id, &filename, &account, role)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}
