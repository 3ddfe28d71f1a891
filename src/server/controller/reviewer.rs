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
            ApplicationDto, AssignReviewersDto, ReviewTokenDto, ReviewerFeedbackDto,
            ReviewersAssignedDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{application, user::parse_role},
        service::reviewer::ReviewerService,
        state::AppState,
    },
};

/// Tag for grouping reviewer endpoints in OpenAPI documentation
pub static REVIEWER_TAG: &str = "reviewer";

/// Assign external reviewers to an application. Grants Manager only.
///
/// Issues one access token per reviewer email; the tokens are returned once.
#[utoipa::path(
    post,
    path = "/api/reviewers/assign/{application_id}",
    tag = REVIEWER_TAG,
    params(("application_id" = i32, Path, description = "Application ID")),
    request_body = AssignReviewersDto,
    responses(
        (status = 200, description = "Reviewers assigned, tokens issued", body = ReviewersAssignedDto),
        (status = 400, description = "No reviewer emails given", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_reviewers(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(application_id): Path<i32>,
    Json(payload): Json<AssignReviewersDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let tokens = ReviewerService::new(&state.db)
        .assign(application_id, payload.reviewer_emails)
        .await?;

    tracing::info!(
        "{} reviewers assigned to application {}",
        tokens.len(),
        application_id
    );

    Ok(Json(ReviewersAssignedDto {
        message: "Reviewers assigned".to_string(),
        reviewer_count: tokens.len(),
        review_tokens: tokens
            .into_iter()
            .map(|t| ReviewTokenDto {
                email: t.email,
                token: t.token,
                assigned_at: t.assigned_at,
            })
            .collect(),
    }))
}

/// Token-holder fetch of the application under review. Public.
#[utoipa::path(
    get,
    path = "/api/reviewers/application/{token}",
    tag = REVIEWER_TAG,
    params(("token" = String, Path, description = "Review access token")),
    responses(
        (status = 200, description = "Application under review", body = ApplicationDto),
        (status = 404, description = "Invalid review token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application_for_review(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let found = ReviewerService::new(&state.db)
        .application_by_token(&token)
        .await?;

    Ok(Json(application::into_dto(found)))
}

/// Review history for an application. Owner, manager, or admin.
#[utoipa::path(
    get,
    path = "/api/reviewers/feedback/{application_id}",
    tag = REVIEWER_TAG,
    params(("application_id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Recorded reviewer feedback", body = ReviewerFeedbackDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reviewer_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let history = ReviewerService::new(&state.db)
        .feedback(application_id, &account, role)
        .await?;

    Ok(Json(ReviewerFeedbackDto {
        application_id,
        feedback: history
            .0
            .into_iter()
            .map(application::review_entry_to_dto)
            .collect(),
    }))
}
