use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Versioned document in the shared library.
///
/// Version payloads are stored base64-encoded inside the `versions` JSON
/// column; `current_version` always points at the highest version number.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// One of `Applications`, `Projects`, `Awards`, `Reports`.
    pub folder: String,
    pub current_version: i32,
    pub versions: DocumentVersions,
    pub created_by: String,
    pub tags: Tags,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// One stored revision of a document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct DocumentVersion {
    pub id: String,
    pub version_number: i32,
    pub file_name: String,
    pub file_type: String,
    /// Base64-encoded file contents.
    pub file_data: String,
    pub file_size: i64,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct DocumentVersions(pub Vec<DocumentVersion>);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Tags(pub Vec<String>);

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
