use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        project::{
            ClosureInitiatedDto, CreateProjectDto, FinalReportReviewDto, FinalReportUploadDto,
            MilestoneCreateDto, MilestoneUpdateDto, PartnerCreateDto, ProgressReportDto,
            ProjectDto, ProjectStatusDto, RequisitionCreateDto, RequisitionReviewDto,
            VcSignoffSubmissionDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            project,
            signoff::SignoffDecision,
            user::parse_role,
        },
        service::project::ProjectService,
        state::AppState,
    },
};

/// Tag for grouping project endpoints in OpenAPI documentation
pub static PROJECT_TAG: &str = "project";

/// Create a project from an accepted application. Grants Manager only.
///
/// The budget defaults to the signed-off award amount and the principal
/// investigator to the applicant.
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = PROJECT_TAG,
    request_body = CreateProjectDto,
    responses(
        (status = 201, description = "Project created", body = ProjectDto),
        (status = 400, description = "Application has no accepted award", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateProjectDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let created = ProjectService::new(&state.db).create(payload).await?;

    tracing::info!(
        "Project {} created from application {}",
        created.id,
        created.application_id
    );

    Ok((StatusCode::CREATED, Json(project::into_dto(created))))
}

/// List projects visible to the caller.
///
/// Researchers see projects funded from their own applications; managers
/// and admins see all.
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = PROJECT_TAG,
    responses(
        (status = 200, description = "Visible projects", body = Vec<ProjectDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let projects = ProjectService::new(&state.db)
        .get_visible(&account, role)
        .await?;

    Ok(Json(
        projects
            .into_iter()
            .map(project::into_dto)
            .collect::<Vec<_>>(),
    ))
}

/// Get a project by id. Owner, manager, or admin.
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = ProjectDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let found = ProjectService::new(&state.db)
        .get_authorized(id, &account, role)
        .await?;

    Ok(Json(project::into_dto(found)))
}

/// Set a project's lifecycle status. Grants Manager only.
#[utoipa::path(
    put,
    path = "/api/projects/{id}/status",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = ProjectStatusDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 400, description = "Invalid status", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_project_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<ProjectStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = ProjectService::new(&state.db)
        .set_status(id, &payload.status)
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Add a milestone to a project. Grants Manager only.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/milestones",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = MilestoneCreateDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_milestone(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<MilestoneCreateDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = ProjectService::new(&state.db)
        .add_milestone(id, payload)
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Update a milestone's fields. Grants Manager only.
#[utoipa::path(
    put,
    path = "/api/projects/{id}/milestones/{milestone_id}",
    tag = PROJECT_TAG,
    params(
        ("id" = i32, Path, description = "Project ID"),
        ("milestone_id" = String, Path, description = "Milestone ID")
    ),
    request_body = MilestoneUpdateDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Project or milestone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_milestone(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, milestone_id)): Path<(i32, String)>,
    Json(payload): Json<MilestoneUpdateDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = ProjectService::new(&state.db)
        .update_milestone(id, &milestone_id, payload)
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Record a progress report upload on a milestone. Owner, manager, or
/// admin; clears the milestone's overdue flag.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/milestones/{milestone_id}/progress-report",
    tag = PROJECT_TAG,
    params(
        ("id" = i32, Path, description = "Project ID"),
        ("milestone_id" = String, Path, description = "Milestone ID")
    ),
    request_body = ProgressReportDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Project or milestone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_progress_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, milestone_id)): Path<(i32, String)>,
    Json(payload): Json<ProgressReportDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let updated = ProjectService::new(&state.db)
        .upload_progress_report(id, &milestone_id, payload.file_name, &account, role)
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Submit a fund requisition against a milestone. Owner, manager, or admin.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/requisitions",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = RequisitionCreateDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Project or milestone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_requisition(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<RequisitionCreateDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let updated = ProjectService::new(&state.db)
        .add_requisition(
            id,
            payload.milestone_id,
            payload.amount,
            payload.notes,
            &account,
            role,
        )
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Approve or reject a pending requisition. Grants Manager only.
#[utoipa::path(
    put,
    path = "/api/projects/{id}/requisitions/{requisition_id}",
    tag = PROJECT_TAG,
    params(
        ("id" = i32, Path, description = "Project ID"),
        ("requisition_id" = String, Path, description = "Requisition ID")
    ),
    request_body = RequisitionReviewDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 400, description = "Invalid decision", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Project or requisition not found", body = ErrorDto),
        (status = 409, description = "Requisition already reviewed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn review_requisition(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, requisition_id)): Path<(i32, String)>,
    Json(payload): Json<RequisitionReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = ProjectService::new(&state.db)
        .review_requisition(
            id,
            &requisition_id,
            &payload.status,
            payload.review_notes,
            &account.email,
        )
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Add a collaborating partner. Grants Manager only.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/partners",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = PartnerCreateDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_partner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<PartnerCreateDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = ProjectService::new(&state.db)
        .add_partner(id, payload)
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Remove a collaborating partner. Grants Manager only.
#[utoipa::path(
    delete,
    path = "/api/projects/{id}/partners/{partner_id}",
    tag = PROJECT_TAG,
    params(
        ("id" = i32, Path, description = "Project ID"),
        ("partner_id" = String, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Project or partner not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_partner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, partner_id)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = ProjectService::new(&state.db)
        .remove_partner(id, &partner_id)
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Upload or replace final report parts. Owner, manager, or admin.
///
/// Resubmission resets any previous review decision.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/final-report",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = FinalReportUploadDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_final_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<FinalReportUploadDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let updated = ProjectService::new(&state.db)
        .upload_final_report(
            id,
            payload.narrative_report,
            payload.financial_report,
            &account,
            role,
        )
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Approve or reject a submitted final report. Grants Manager only.
#[utoipa::path(
    put,
    path = "/api/projects/{id}/final-report/review",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = FinalReportReviewDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 400, description = "Invalid decision", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Project or final report not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn review_final_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<FinalReportReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let updated = ProjectService::new(&state.db)
        .review_final_report(id, &payload.status, payload.review_notes, &account.email)
        .await?;

    Ok(Json(project::into_dto(updated)))
}

/// Start VC closure sign-off on a project with an approved final report.
/// Grants Manager only.
///
/// The VC token is returned once and is the only way to submit the closure
/// decision.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/closure/initiate",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Closure sign-off started", body = ClosureInitiatedDto),
        (status = 400, description = "Final report not approved", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Requires the Grants Manager role", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 409, description = "Closure sign-off already in progress", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn initiate_closure(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await?;

    let token = ProjectService::new(&state.db).initiate_closure(id).await?;

    tracing::info!("Closure sign-off initiated on project {}", id);

    Ok(Json(ClosureInitiatedDto {
        message: "Closure sign-off initiated".to_string(),
        vc_sign_off_token: token,
    }))
}

/// Token-holder view of the project awaiting VC sign-off. Public.
#[utoipa::path(
    get,
    path = "/api/projects/vc-signoff/{token}",
    tag = PROJECT_TAG,
    params(("token" = String, Path, description = "VC sign-off access token")),
    responses(
        (status = 200, description = "Project awaiting sign-off", body = ProjectDto),
        (status = 404, description = "Invalid sign-off token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn view_closure(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let found = ProjectService::new(&state.db)
        .closure_view_by_token(&token)
        .await?;

    Ok(Json(project::into_dto(found)))
}

/// Submit the VC closure decision. Public, token-gated.
///
/// Approval generates the closure certificate and completes the project;
/// rejection leaves the project active.
#[utoipa::path(
    post,
    path = "/api/projects/vc-signoff/{token}/submit",
    tag = PROJECT_TAG,
    params(("token" = String, Path, description = "VC sign-off access token")),
    request_body = VcSignoffSubmissionDto,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 400, description = "Invalid decision value", body = ErrorDto),
        (status = 404, description = "Invalid sign-off token", body = ErrorDto),
        (status = 409, description = "Token already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_closure_decision(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<VcSignoffSubmissionDto>,
) -> Result<impl IntoResponse, AppError> {
    let decision = SignoffDecision::parse(&payload.decision)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid decision: {}", payload.decision)))?;

    let updated = ProjectService::new(&state.db)
        .submit_closure_decision(
            &token,
            decision == SignoffDecision::Approved,
            payload.notes,
            payload.vc_name,
        )
        .await?;

    Ok(Json(project::into_dto(updated)))
}
