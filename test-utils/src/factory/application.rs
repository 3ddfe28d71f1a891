//! Application factory for creating test application entities.

use crate::factory::helpers::next_id;
use chrono::{Duration, Utc};
use entity::application::{ReviewHistory, SignoffWorkflow};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test applications with customizable fields.
///
/// Defaults produce a freshly submitted application with no review history
/// and no sign-off workflow.
pub struct ApplicationFactory<'a> {
    db: &'a DatabaseConnection,
    grant_call_id: i32,
    applicant_name: String,
    email: String,
    proposal_title: String,
    status: String,
    deadline: Option<chrono::DateTime<Utc>>,
    signoff_workflow: Option<SignoffWorkflow>,
}

impl<'a> ApplicationFactory<'a> {
    /// Creates a new ApplicationFactory with default values.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `grant_call_id` - Grant call the application is submitted against
    pub fn new(db: &'a DatabaseConnection, grant_call_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            grant_call_id,
            applicant_name: format!("Dr. Applicant {}", id),
            email: format!("applicant{}@grants.edu", id),
            proposal_title: format!("Proposal {}", id),
            status: "submitted".to_string(),
            deadline: Some(Utc::now() + Duration::days(30)),
            signoff_workflow: None,
        }
    }

    /// Sets the applicant display name.
    pub fn applicant_name(mut self, applicant_name: impl Into<String>) -> Self {
        self.applicant_name = applicant_name.into();
        self
    }

    /// Sets the applicant email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the proposal title.
    pub fn proposal_title(mut self, proposal_title: impl Into<String>) -> Self {
        self.proposal_title = proposal_title.into();
        self
    }

    /// Sets the workflow status string.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the withdrawal deadline (None disables the deadline check).
    pub fn deadline(mut self, deadline: Option<chrono::DateTime<Utc>>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Attaches a sign-off workflow to the application.
    pub fn signoff_workflow(mut self, workflow: SignoffWorkflow) -> Self {
        self.signoff_workflow = Some(workflow);
        self
    }

    /// Builds and inserts the application entity into the database.
    pub async fn build(self) -> Result<entity::application::Model, DbErr> {
        let now = Utc::now();
        entity::application::ActiveModel {
            grant_call_id: ActiveValue::Set(self.grant_call_id),
            applicant_name: ActiveValue::Set(self.applicant_name),
            email: ActiveValue::Set(self.email),
            proposal_title: ActiveValue::Set(self.proposal_title),
            status: ActiveValue::Set(self.status),
            submission_date: ActiveValue::Set(now),
            deadline: ActiveValue::Set(self.deadline),
            revision_count: ActiveValue::Set(0),
            is_editable: ActiveValue::Set(false),
            review_history: ActiveValue::Set(ReviewHistory::default()),
            signoff_workflow: ActiveValue::Set(self.signoff_workflow),
            award_letter_generated: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a submitted application with default values.
pub async fn create_application(
    db: &DatabaseConnection,
    grant_call_id: i32,
) -> Result<entity::application::Model, DbErr> {
    ApplicationFactory::new(db, grant_call_id).build().await
}
