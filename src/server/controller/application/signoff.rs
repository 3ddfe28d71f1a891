use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        application::{
            ApplicationDto, SignoffDecisionDto, SignoffInitiateDto, SignoffInitiatedDto,
            SignoffStatusDto, SignoffTokenDto, SignoffViewDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{application, signoff::SignoffDecision},
        service::signoff::SignoffService,
        state::AppState,
    },
};

use super::APPLICATION_TAG;

/// Start the award sign-off workflow on a manager-approved application.
/// Grants Manager only.
///
/// Issues one unguessable token per approver; the tokens are returned once
/// and are the only way to submit a decision.
#[utoipa::path(
    post,
    path = "/api/applications/{id}/signoff/initiate",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = SignoffInitiateDto,
    responses(
        (status = 200, description = "Workflow started, tokens issued", body = SignoffInitiatedDto),
        (status = 400, description = "No approvers, or application not manager-approved", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn initiate_signoff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<SignoffInitiateDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let issued = SignoffService::new(&state.db)
        .initiate(id, &account.email, payload.award_amount, payload.approvers)
        .await?;

    tracing::info!(
        "Sign-off initiated on application {} with {} approvers",
        id,
        issued.len()
    );

    Ok(Json(SignoffInitiatedDto {
        message: "Sign-off workflow initiated".to_string(),
        sign_off_tokens: issued
            .into_iter()
            .map(|t| SignoffTokenDto {
                role: t.role,
                email: t.email,
                token: t.token,
            })
            .collect(),
    }))
}

/// Token-holder view of an application awaiting sign-off. Public.
#[utoipa::path(
    get,
    path = "/api/applications/signoff/{token}",
    tag = APPLICATION_TAG,
    params(("token" = String, Path, description = "Sign-off access token")),
    responses(
        (status = 200, description = "Application and the holder's approval entry", body = SignoffViewDto),
        (status = 404, description = "Invalid sign-off token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn view_signoff(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (found, approval) = SignoffService::new(&state.db).view_by_token(&token).await?;

    Ok(Json(SignoffViewDto {
        application: application::into_dto(found),
        approval: application::signoff_approval_to_dto(approval),
    }))
}

/// Submit an approver's sign-off decision. Public, token-gated.
///
/// A token whose entry was already decided is refused with a 409.
#[utoipa::path(
    post,
    path = "/api/applications/signoff/{token}",
    tag = APPLICATION_TAG,
    params(("token" = String, Path, description = "Sign-off access token")),
    request_body = SignoffDecisionDto,
    responses(
        (status = 200, description = "Updated application", body = ApplicationDto),
        (status = 400, description = "Invalid decision value", body = ErrorDto),
        (status = 404, description = "Invalid sign-off token", body = ErrorDto),
        (status = 409, description = "Token already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_signoff_decision(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<SignoffDecisionDto>,
) -> Result<impl IntoResponse, AppError> {
    let decision = SignoffDecision::parse(&payload.decision)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid decision: {}", payload.decision)))?;

    let updated = SignoffService::new(&state.db)
        .submit_decision(&token, decision, payload.comments, payload.approver_name)
        .await?;

    Ok(Json(application::into_dto(updated)))
}

/// Aggregate sign-off progress for an application. Grants Manager only.
#[utoipa::path(
    get,
    path = "/api/applications/{id}/signoff/status",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Completed and total approval counts", body = SignoffStatusDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Application or workflow not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signoff_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let tally = SignoffService::new(&state.db).status(id).await?;

    Ok(Json(SignoffStatusDto {
        current_status: tally.outcome.as_str().to_string(),
        completed_approvals: tally.completed,
        total_approvals: tally.total,
    }))
}
