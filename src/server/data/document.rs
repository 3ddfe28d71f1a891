use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Optional listing filters. The substring search runs over name, current
/// filenames, and tags after the SQL-level filters.
#[derive(Default)]
pub struct DocumentFilter {
    pub folder: Option<String>,
    pub created_by: Option<String>,
    pub search: Option<String>,
}

pub struct DocumentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DocumentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a document with its first version.
    pub async fn create(
        &self,
        name: String,
        folder: String,
        created_by: String,
        tags: Vec<String>,
        version: entity::document::DocumentVersion,
    ) -> Result<entity::document::Model, DbErr> {
        let now = Utc::now();
        entity::document::ActiveModel {
            name: ActiveValue::Set(name),
            folder: ActiveValue::Set(folder),
            current_version: ActiveValue::Set(1),
            versions: ActiveValue::Set(entity::document::DocumentVersions(vec![version])),
            created_by: ActiveValue::Set(created_by),
            tags: ActiveValue::Set(entity::document::Tags(tags)),
            created_at: ActiveValue::Set(now),
            last_modified: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::document::Model>, DbErr> {
        entity::prelude::Document::find_by_id(id).one(self.db).await
    }

    /// Gets documents, most recently modified first.
    pub async fn get_all(
        &self,
        filter: DocumentFilter,
    ) -> Result<Vec<entity::document::Model>, DbErr> {
        let mut query = entity::prelude::Document::find()
            .order_by_desc(entity::document::Column::LastModified);

        if let Some(folder) = filter.folder {
            query = query.filter(entity::document::Column::Folder.eq(folder));
        }
        if let Some(created_by) = filter.created_by {
            query = query.filter(entity::document::Column::CreatedBy.eq(created_by));
        }

        let documents = query.all(self.db).await?;

        let Some(search) = filter.search else {
            return Ok(documents);
        };
        let needle = search.to_lowercase();

        Ok(documents
            .into_iter()
            .filter(|doc| {
                doc.name.to_lowercase().contains(&needle)
                    || doc
                        .versions
                        .0
                        .iter()
                        .any(|v| v.file_name.to_lowercase().contains(&needle))
                    || doc.tags.0.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Appends a version and bumps the current version number.
    pub async fn add_version(
        &self,
        id: i32,
        mut version: entity::document::DocumentVersion,
    ) -> Result<Option<entity::document::Model>, DbErr> {
        let Some(document) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let next_version = document.current_version + 1;
        version.version_number = next_version;

        let mut versions = document.versions.clone();
        versions.0.push(version);

        let mut active: entity::document::ActiveModel = document.into();
        active.current_version = ActiveValue::Set(next_version);
        active.versions = ActiveValue::Set(versions);
        active.last_modified = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Document::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Counts documents per folder.
    pub async fn count_by_folder(&self, folder: &str) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        entity::prelude::Document::find()
            .filter(entity::document::Column::Folder.eq(folder))
            .count(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        entity::prelude::Document::find().count(self.db).await
    }
}
