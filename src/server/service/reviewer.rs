//! External reviewer assignment and token access.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::application::ApplicationRepository, error::AppError, model::user::Role,
    util::random,
};

const REVIEW_TOKEN_LENGTH: usize = 32;

pub struct ReviewerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewerService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Assigns reviewer emails to an application, issuing one access token
    /// per reviewer.
    pub async fn assign(
        &self,
        application_id: i32,
        reviewer_emails: Vec<String>,
    ) -> Result<Vec<entity::application::ReviewToken>, AppError> {
        if reviewer_emails.is_empty() {
            return Err(AppError::BadRequest(
                "At least one reviewer email is required".to_string(),
            ));
        }

        let repo = ApplicationRepository::new(self.db);
        repo.find_by_id(application_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Application {} not found", application_id))
        })?;

        let now = Utc::now();
        let tokens: Vec<entity::application::ReviewToken> = reviewer_emails
            .iter()
            .map(|email| entity::application::ReviewToken {
                email: email.clone(),
                token: random::alphanumeric_token(REVIEW_TOKEN_LENGTH),
                assigned_at: now,
            })
            .collect();

        repo.assign_reviewers(
            application_id,
            entity::application::AssignedReviewers(reviewer_emails),
            entity::application::ReviewTokens(tokens.clone()),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {} not found", application_id)))?;

        Ok(tokens)
    }

    /// Token-holder fetch of the application under review.
    pub async fn application_by_token(
        &self,
        token: &str,
    ) -> Result<entity::application::Model, AppError> {
        ApplicationRepository::new(self.db)
            .find_by_review_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid review token".to_string()))
    }

    /// Review history for an application; owner or managers/admins.
    pub async fn feedback(
        &self,
        application_id: i32,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<entity::application::ReviewHistory, AppError> {
        let application = ApplicationRepository::new(self.db)
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", application_id))
            })?;

        if role == Role::Researcher && application.email != user.email {
            return Err(AppError::Forbidden(
                "You do not have access to this application's reviews".to_string(),
            ));
        }

        Ok(application.review_history)
    }
}
