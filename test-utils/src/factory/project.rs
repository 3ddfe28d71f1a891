//! Project factory for creating test project entities.

use crate::factory::helpers::next_id;
use chrono::{Duration, Utc};
use entity::project::{Milestones, Partners, Requisitions};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test projects with customizable fields.
///
/// Defaults produce an active project with a one-year runtime and no
/// milestones, requisitions, or partners.
pub struct ProjectFactory<'a> {
    db: &'a DatabaseConnection,
    application_id: i32,
    title: String,
    status: String,
    milestones: Milestones,
}

impl<'a> ProjectFactory<'a> {
    /// Creates a new ProjectFactory with default values.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `application_id` - Application the project was created from
    pub fn new(db: &'a DatabaseConnection, application_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            application_id,
            title: format!("Project {}", id),
            status: "active".to_string(),
            milestones: Milestones::default(),
        }
    }

    /// Sets the project title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the project status string.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Seeds the project with milestones.
    pub fn milestones(mut self, milestones: Milestones) -> Self {
        self.milestones = milestones;
        self
    }

    /// Builds and inserts the project entity into the database.
    pub async fn build(self) -> Result<entity::project::Model, DbErr> {
        let now = Utc::now();
        entity::project::ActiveModel {
            application_id: ActiveValue::Set(self.application_id),
            title: ActiveValue::Set(self.title),
            status: ActiveValue::Set(self.status),
            start_date: ActiveValue::Set(now),
            end_date: ActiveValue::Set(now + Duration::days(365)),
            milestones: ActiveValue::Set(self.milestones),
            requisitions: ActiveValue::Set(Requisitions::default()),
            partners: ActiveValue::Set(Partners::default()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active project with default values.
pub async fn create_project(
    db: &DatabaseConnection,
    application_id: i32,
) -> Result<entity::project::Model, DbErr> {
    ProjectFactory::new(db, application_id).build().await
}
