use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    pub id: i32,
    pub name: String,
    pub folder: String,
    pub current_version: i32,
    pub versions: Vec<DocumentVersionDto>,
    pub created_by: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// Version metadata without the stored file content.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersionDto {
    pub id: String,
    pub version_number: i32,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUploadDto {
    pub name: String,
    pub folder: String,
    pub file_name: String,
    pub file_type: Option<String>,
    /// Base64-encoded file content.
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersionUploadDto {
    pub file_name: String,
    pub file_type: Option<String>,
    /// Base64-encoded file content.
    pub content: String,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContentDto {
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    /// Base64-encoded file content.
    pub content: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatsDto {
    pub total_documents: u64,
    pub by_folder: Vec<FolderCountDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderCountDto {
    pub folder: String,
    pub count: u64,
}
