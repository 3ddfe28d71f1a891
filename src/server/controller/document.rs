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
        document::{DocumentDto, DocumentStatsDto, DocumentUploadDto, DocumentVersionUploadDto, FolderCountDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{document, user::parse_role},
        service::document::DocumentService,
        state::AppState,
    },
};

/// Tag for grouping document endpoints in OpenAPI documentation
pub static DOCUMENT_TAG: &str = "document";

/// Query parameters for listing documents.
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListParams {
    /// Restrict to one folder.
    pub folder: Option<String>,
    /// Case-insensitive substring match on name, filenames, and tags.
    pub search: Option<String>,
}

/// Upload a new document with its first version.
///
/// Content arrives base64-encoded; only pdf, doc, docx, and txt files are
/// accepted.
#[utoipa::path(
    post,
    path = "/api/documents",
    tag = DOCUMENT_TAG,
    request_body = DocumentUploadDto,
    responses(
        (status = 201, description = "Document created", body = DocumentDto),
        (status = 400, description = "Unknown folder, bad extension, or invalid base64", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<DocumentUploadDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;

    let created = DocumentService::new(&state.db)
        .upload(payload, &account.email)
        .await?;

    Ok((StatusCode::CREATED, Json(document::into_dto(created))))
}

/// List documents visible to the caller.
///
/// Researchers see only their own uploads; managers and admins see all.
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = DOCUMENT_TAG,
    params(DocumentListParams),
    responses(
        (status = 200, description = "Visible documents", body = Vec<DocumentDto>),
        (status = 400, description = "Unknown folder", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DocumentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let documents = DocumentService::new(&state.db)
        .list(params.folder, params.search, &account, role)
        .await?;

    Ok(Json(
        documents
            .into_iter()
            .map(document::into_dto)
            .collect::<Vec<_>>(),
    ))
}

/// Document counts per folder plus the total.
#[utoipa::path(
    get,
    path = "/api/documents/stats",
    tag = DOCUMENT_TAG,
    responses(
        (status = 200, description = "Library statistics", body = DocumentStatsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_document_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state, &headers).require(&[]).await?;

    let (total_documents, by_folder) = DocumentService::new(&state.db).stats().await?;

    Ok(Json(DocumentStatsDto {
        total_documents,
        by_folder: by_folder
            .into_iter()
            .map(|c| FolderCountDto {
                folder: c.folder,
                count: c.count,
            })
            .collect(),
    }))
}

/// Get a document's metadata by id. Creator, manager, or admin.
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document metadata", body = DocumentDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let found = DocumentService::new(&state.db)
        .get_authorized(id, &account, role)
        .await?;

    Ok(Json(document::into_dto(found)))
}

/// Download the latest version's content. Creator, manager, or admin.
#[utoipa::path(
    get,
    path = "/api/documents/{id}/download",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "File content", body = Vec<u8>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let (file_name, file_type, bytes) = DocumentService::new(&state.db)
        .download_latest(id, &account, role)
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

/// Append a new version to a document. Creator, manager, or admin.
#[utoipa::path(
    post,
    path = "/api/documents/{id}/versions",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    request_body = DocumentVersionUploadDto,
    responses(
        (status = 200, description = "Updated document", body = DocumentDto),
        (status = 400, description = "Bad extension or invalid base64", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_document_version(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<DocumentVersionUploadDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    let updated = DocumentService::new(&state.db)
        .upload_version(id, payload, &account, role)
        .await?;

    Ok(Json(document::into_dto(updated)))
}

/// Delete a document and all its versions. Creator, manager, or admin.
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state, &headers).require(&[]).await?;
    let role = parse_role(&account)?;

    DocumentService::new(&state.db)
        .delete(id, &account, role)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
