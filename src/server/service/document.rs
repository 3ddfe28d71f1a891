//! Versioned document library.

use base64::Engine;
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::model::document::{DocumentUploadDto, DocumentVersionUploadDto};
use crate::server::{
    data::document::{DocumentFilter, DocumentRepository},
    error::AppError,
    model::{
        document::{content_type_for, has_allowed_extension, DocumentFolder},
        user::Role,
    },
    util::random,
};

const VERSION_ID_LENGTH: usize = 16;

pub struct FolderCount {
    pub folder: String,
    pub count: u64,
}

pub struct DocumentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DocumentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Uploads a new document with its first version. The content arrives
    /// base64-encoded and is stored as-is; size is measured on the decoded
    /// bytes.
    pub async fn upload(
        &self,
        dto: DocumentUploadDto,
        created_by: &str,
    ) -> Result<entity::document::Model, AppError> {
        if DocumentFolder::parse(&dto.folder).is_none() {
            return Err(AppError::BadRequest(format!(
                "Unknown folder: {}",
                dto.folder
            )));
        }

        let version = self.build_version(
            1,
            dto.file_name,
            dto.file_type,
            &dto.content,
            created_by,
            dto.notes,
        )?;

        Ok(DocumentRepository::new(self.db)
            .create(
                dto.name,
                dto.folder,
                created_by.to_string(),
                dto.tags.unwrap_or_default(),
                version,
            )
            .await?)
    }

    /// Lists documents with folder and substring filters. Researchers only
    /// see their own documents.
    pub async fn list(
        &self,
        folder: Option<String>,
        search: Option<String>,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<Vec<entity::document::Model>, AppError> {
        if let Some(folder) = &folder {
            if DocumentFolder::parse(folder).is_none() {
                return Err(AppError::BadRequest(format!("Unknown folder: {}", folder)));
            }
        }

        let created_by = (role == Role::Researcher).then(|| user.email.clone());

        Ok(DocumentRepository::new(self.db)
            .get_all(DocumentFilter {
                folder,
                created_by,
                search,
            })
            .await?)
    }

    pub async fn get_authorized(
        &self,
        id: i32,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<entity::document::Model, AppError> {
        let document = DocumentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))?;

        if role == Role::Researcher && document.created_by != user.email {
            return Err(AppError::Forbidden(
                "You do not have access to this document".to_string(),
            ));
        }

        Ok(document)
    }

    /// Fetches the latest version's content for download.
    pub async fn download_latest(
        &self,
        id: i32,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<(String, String, Vec<u8>), AppError> {
        let document = self.get_authorized(id, user, role).await?;

        let version = document
            .versions
            .0
            .iter()
            .find(|v| v.version_number == document.current_version)
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Document {} is missing its current version {}",
                    id, document.current_version
                ))
            })?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(version.file_data.as_bytes())
            .map_err(|e| {
                AppError::InternalError(format!(
                    "Stored content for document {} is not valid base64: {}",
                    id, e
                ))
            })?;

        Ok((version.file_name.clone(), version.file_type.clone(), bytes))
    }

    /// Appends a new version to an existing document.
    pub async fn upload_version(
        &self,
        id: i32,
        dto: DocumentVersionUploadDto,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<entity::document::Model, AppError> {
        self.get_authorized(id, user, role).await?;

        // The repository assigns the real version number.
        let version = self.build_version(
            0,
            dto.file_name,
            dto.file_type,
            &dto.content,
            &user.email,
            dto.notes,
        )?;

        DocumentRepository::new(self.db)
            .add_version(id, version)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))
    }

    pub async fn delete(
        &self,
        id: i32,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<(), AppError> {
        self.get_authorized(id, user, role).await?;

        if !DocumentRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Document {} not found", id)));
        }
        Ok(())
    }

    /// Document counts per folder plus the total.
    pub async fn stats(&self) -> Result<(u64, Vec<FolderCount>), AppError> {
        let repo = DocumentRepository::new(self.db);

        let total = repo.count().await?;
        let mut by_folder = Vec::with_capacity(DocumentFolder::ALL.len());
        for folder in DocumentFolder::ALL {
            by_folder.push(FolderCount {
                folder: folder.as_str().to_string(),
                count: repo.count_by_folder(folder.as_str()).await?,
            });
        }

        Ok((total, by_folder))
    }

    fn build_version(
        &self,
        version_number: i32,
        file_name: String,
        file_type: Option<String>,
        content: &str,
        uploaded_by: &str,
        notes: Option<String>,
    ) -> Result<entity::document::DocumentVersion, AppError> {
        if !has_allowed_extension(&file_name) {
            return Err(AppError::BadRequest(format!(
                "File type not allowed: {}",
                file_name
            )));
        }

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(content.as_bytes())
            .map_err(|_| AppError::BadRequest("Content is not valid base64".to_string()))?;

        Ok(entity::document::DocumentVersion {
            id: random::alphanumeric_token(VERSION_ID_LENGTH),
            version_number,
            file_type: file_type.unwrap_or_else(|| content_type_for(&file_name).to_string()),
            file_name,
            file_data: content.to_string(),
            file_size: bytes.len() as i64,
            uploaded_by: uploaded_by.to_string(),
            uploaded_at: Utc::now(),
            notes,
        })
    }
}
