//! Grant call factory for creating test grant call entities.

use crate::factory::helpers::next_id;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test grant calls with customizable fields.
///
/// Defaults produce an open public call with a deadline 30 days out.
pub struct GrantCallFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    grant_type: String,
    status: String,
    deadline: chrono::DateTime<Utc>,
}

impl<'a> GrantCallFactory<'a> {
    /// Creates a new GrantCallFactory with default values.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Grant Call {}", id),
            grant_type: "ORI".to_string(),
            status: "Open".to_string(),
            deadline: Utc::now() + Duration::days(30),
        }
    }

    /// Sets the title for the grant call.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the grant type for the call.
    pub fn grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = grant_type.into();
        self
    }

    /// Sets the status (`Open` / `Closed`) for the call.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the submission deadline for the call.
    pub fn deadline(mut self, deadline: chrono::DateTime<Utc>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Builds and inserts the grant call entity into the database.
    pub async fn build(self) -> Result<entity::grant_call::Model, DbErr> {
        let now = Utc::now();
        entity::grant_call::ActiveModel {
            title: ActiveValue::Set(self.title),
            grant_type: ActiveValue::Set(self.grant_type),
            sponsor: ActiveValue::Set("National Science Foundation".to_string()),
            scope: ActiveValue::Set("Supporting innovative research projects".to_string()),
            status: ActiveValue::Set(self.status),
            deadline: ActiveValue::Set(self.deadline),
            eligibility: ActiveValue::Set("Open to all researchers".to_string()),
            requirements: ActiveValue::Set("Proposal with budget and timeline".to_string()),
            visibility: ActiveValue::Set("Public".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open grant call with default values.
pub async fn create_grant_call(db: &DatabaseConnection) -> Result<entity::grant_call::Model, DbErr> {
    GrantCallFactory::new(db).build().await
}
