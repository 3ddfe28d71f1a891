//! Document factory for creating test document entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::document::{DocumentVersion, DocumentVersions, Tags};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test documents with one initial version.
pub struct DocumentFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    folder: String,
    created_by: String,
    tags: Vec<String>,
}

impl<'a> DocumentFactory<'a> {
    /// Creates a new DocumentFactory with default values.
    ///
    /// Defaults: folder `"Applications"`, a generated owner email, no tags.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Document {}", id),
            folder: "Applications".to_string(),
            created_by: format!("user{}@grants.edu", id),
            tags: Vec::new(),
        }
    }

    /// Sets the document display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the folder the document lives in.
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Sets the owner email.
    pub fn created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// Sets the search tags.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Builds and inserts the document entity with a single version.
    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        let now = Utc::now();
        let version = DocumentVersion {
            id: "v1".to_string(),
            version_number: 1,
            file_name: format!("{}.pdf", self.name.to_lowercase().replace(' ', "-")),
            file_type: "application/pdf".to_string(),
            file_data: "dGVzdA==".to_string(),
            file_size: 4,
            uploaded_by: self.created_by.clone(),
            uploaded_at: now,
            notes: None,
        };

        entity::document::ActiveModel {
            name: ActiveValue::Set(self.name),
            folder: ActiveValue::Set(self.folder),
            current_version: ActiveValue::Set(1),
            versions: ActiveValue::Set(DocumentVersions(vec![version])),
            created_by: ActiveValue::Set(self.created_by),
            tags: ActiveValue::Set(Tags(self.tags)),
            created_at: ActiveValue::Set(now),
            last_modified: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a document with default values.
pub async fn create_document(db: &DatabaseConnection) -> Result<entity::document::Model, DbErr> {
    DocumentFactory::new(db).build().await
}
