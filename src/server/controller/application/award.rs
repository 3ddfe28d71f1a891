use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        application::{ApplicationDto, AwardResponseDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{application, user::parse_role},
        service::award::AwardService,
        state::AppState,
    },
};

use super::APPLICATION_TAG;

const DECISION_ACCEPTED: &str = "accepted";
const DECISION_DECLINED: &str = "declined";

/// Generate and store the award letter for a sign-off-approved application.
/// Grants Manager only.
///
/// Idempotent: calling again returns the application with the
/// already-generated letter.
#[utoipa::path(
    post,
    path = "/api/applications/{id}/award-letter/generate",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application with the generated letter", body = ApplicationDto),
        (status = 400, description = "Application is not sign-off approved", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_award_letter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = AwardService::new(&state.db).generate_letter(id).await?;

    tracing::info!("Award letter generated for application {}", id);

    Ok(Json(application::into_dto(updated)))
}

/// Download the stored award letter. Applicant, manager, or admin.
#[utoipa::path(
    get,
    path = "/api/applications/{id}/award-letter",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Letter content", body = Vec<u8>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the applicant", body = ErrorDto),
        (status = 404, description = "No award letter on this application", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_award_letter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let (file_name, file_type, bytes) = AwardService::new(&state.db)
        .letter(id, &account, role)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, file_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    ))
}

/// Accept or decline a pending award. Applicant only.
#[utoipa::path(
    post,
    path = "/api/applications/{id}/award/respond",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = AwardResponseDto,
    responses(
        (status = 200, description = "Updated application", body = ApplicationDto),
        (status = 400, description = "Invalid decision, or no award is pending", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the applicant", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn respond_to_award(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<AwardResponseDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;

    let accepted = match payload.decision.as_str() {
        DECISION_ACCEPTED => true,
        DECISION_DECLINED => false,
        other => {
            return Err(AppError::BadRequest(format!("Invalid decision: {}", other)));
        }
    };

    let updated = AwardService::new(&state.db)
        .respond(id, &account, accepted)
        .await?;

    tracing::info!(
        "Applicant {} the award on application {}",
        payload.decision,
        id
    );

    Ok(Json(application::into_dto(updated)))
}
