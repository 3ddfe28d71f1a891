//! Application submission and the status workflow.
//!
//! Every status change funnels through [`ApplicationService::transition`],
//! which enforces the transition table and the per-role rules: researchers
//! may only resubmit returned applications, managers and admins may perform
//! any move the table allows.

use base64::Engine;
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{application::ApplicationRepository, grant_call::GrantCallRepository},
    error::AppError,
    model::{
        application::{ApplicationFilter, CreateApplicationParams, UpdateApplicationParams},
        grant_call::GrantCallStatus,
        status::ApplicationStatus,
        user::Role,
    },
    util::random,
};

/// Parses a stored status string, treating an unknown value as data
/// corruption rather than user error.
pub fn parse_status(application: &entity::application::Model) -> Result<ApplicationStatus, AppError> {
    ApplicationStatus::parse(&application.status).ok_or_else(|| {
        AppError::InternalError(format!(
            "Application {} has unknown status {}",
            application.id, application.status
        ))
    })
}

pub struct ApplicationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submits a new application. The grant call must exist, be open, and
    /// its deadline must not have passed; the deadline is snapshotted onto
    /// the application to gate later withdrawal.
    pub async fn submit(
        &self,
        params: CreateApplicationParams,
    ) -> Result<entity::application::Model, AppError> {
        let call = GrantCallRepository::new(self.db)
            .find_by_id(params.grant_call_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Grant call {} not found", params.grant_call_id))
            })?;

        if GrantCallStatus::parse(&call.status) != Some(GrantCallStatus::Open) {
            return Err(AppError::BadRequest(
                "This grant call is not open for submissions".to_string(),
            ));
        }
        if call.deadline < Utc::now() {
            return Err(AppError::BadRequest(
                "The submission deadline for this grant call has passed".to_string(),
            ));
        }

        Ok(ApplicationRepository::new(self.db)
            .create(params, Some(call.deadline))
            .await?)
    }

    /// Gets applications visible to the caller. Researchers see their own;
    /// managers and admins see all.
    pub async fn get_visible(
        &self,
        user: &entity::user::Model,
        role: Role,
        mut filter: ApplicationFilter,
    ) -> Result<Vec<entity::application::Model>, AppError> {
        if role == Role::Researcher {
            filter.email = Some(user.email.clone());
        }

        Ok(ApplicationRepository::new(self.db).get_all(filter).await?)
    }

    /// Gets one application, enforcing the owner-or-manager access rule.
    pub async fn get_authorized(
        &self,
        id: i32,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<entity::application::Model, AppError> {
        let application = ApplicationRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;

        if role == Role::Researcher && application.email != user.email {
            return Err(AppError::Forbidden(
                "You do not have access to this application".to_string(),
            ));
        }

        Ok(application)
    }

    /// Updates application fields. Researchers may only touch their own
    /// records.
    pub async fn update(
        &self,
        id: i32,
        user: &entity::user::Model,
        role: Role,
        params: UpdateApplicationParams,
    ) -> Result<entity::application::Model, AppError> {
        // Ownership check doubles as the existence check.
        self.get_authorized(id, user, role).await?;

        ApplicationRepository::new(self.db)
            .update_fields(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))
    }

    /// The unified status transition endpoint.
    pub async fn transition(
        &self,
        id: i32,
        user: &entity::user::Model,
        role: Role,
        new_status: &str,
        comments: Option<String>,
    ) -> Result<entity::application::Model, AppError> {
        let repo = ApplicationRepository::new(self.db);

        let application = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;

        let from = parse_status(&application)?;
        let to = ApplicationStatus::parse(new_status)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid status: {}", new_status)))?;

        if !ApplicationStatus::can_transition(from, to) {
            return Err(AppError::BadRequest(format!(
                "Cannot move an application from {} to {}",
                from.as_str(),
                to.as_str()
            )));
        }

        if role == Role::Researcher {
            if application.email != user.email {
                return Err(AppError::Forbidden(
                    "You do not have access to this application".to_string(),
                ));
            }
            if !ApplicationStatus::is_resubmission(from, to) {
                return Err(AppError::Forbidden(
                    "Researchers may only resubmit a returned application".to_string(),
                ));
            }

            return repo
                .resubmit(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)));
        }

        if ApplicationStatus::is_resubmission(from, to) {
            return repo
                .resubmit(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)));
        }

        repo.set_status(id, to, comments)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))
    }

    /// Withdraws the caller's own application, only from pre-decision
    /// states and only before the grant call deadline.
    pub async fn withdraw(
        &self,
        id: i32,
        user: &entity::user::Model,
    ) -> Result<entity::application::Model, AppError> {
        let repo = ApplicationRepository::new(self.db);

        let application = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;

        if application.email != user.email {
            return Err(AppError::Forbidden(
                "You can only withdraw your own application".to_string(),
            ));
        }

        let status = parse_status(&application)?;
        if !status.is_withdrawable() {
            return Err(AppError::BadRequest(format!(
                "An application in status {} cannot be withdrawn",
                status.as_str()
            )));
        }

        if let Some(deadline) = application.deadline {
            if Utc::now() > deadline {
                return Err(AppError::BadRequest(
                    "The withdrawal window closed with the grant call deadline".to_string(),
                ));
            }
        }

        repo.set_status(id, ApplicationStatus::Withdrawn, None)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))
    }

    /// Researcher resubmission with the same rules as the unified endpoint.
    pub async fn resubmit(
        &self,
        id: i32,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<entity::application::Model, AppError> {
        self.transition(id, user, role, ApplicationStatus::Submitted.as_str(), None)
            .await
    }

    /// Appends a reviewer feedback entry, optionally transitioning the
    /// status.
    pub async fn add_review(
        &self,
        id: i32,
        reviewer_name: String,
        reviewer_email: String,
        comments: String,
        new_status: Option<&str>,
    ) -> Result<entity::application::Model, AppError> {
        let repo = ApplicationRepository::new(self.db);

        let application = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;

        let from = parse_status(&application)?;
        let to = match new_status {
            Some(value) => {
                let to = ApplicationStatus::parse(value)
                    .ok_or_else(|| AppError::BadRequest(format!("Invalid status: {}", value)))?;
                if !ApplicationStatus::can_transition(from, to) {
                    return Err(AppError::BadRequest(format!(
                        "Cannot move an application from {} to {}",
                        from.as_str(),
                        to.as_str()
                    )));
                }
                Some(to)
            }
            None => None,
        };

        let entry = entity::application::ReviewEntry {
            id: random::alphanumeric_token(16),
            reviewer_name,
            reviewer_email,
            comments,
            submitted_at: Utc::now(),
            status: to.unwrap_or(from).as_str().to_string(),
        };

        repo.append_review_entry(id, entry, to)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))
    }

    /// Records the received contract; only valid from `contract_pending`.
    pub async fn upload_contract(
        &self,
        id: i32,
        file_name: String,
    ) -> Result<entity::application::Model, AppError> {
        let repo = ApplicationRepository::new(self.db);

        let application = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;

        let from = parse_status(&application)?;
        if !ApplicationStatus::can_transition(from, ApplicationStatus::ContractReceived) {
            return Err(AppError::BadRequest(format!(
                "Cannot record a contract for an application in status {}",
                from.as_str()
            )));
        }

        repo.set_contract_file(id, file_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))
    }

    /// Fetches the stored proposal file for download, enforcing the
    /// owner-or-manager rule and matching the requested filename.
    pub async fn proposal_file(
        &self,
        id: i32,
        file_name: &str,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<(String, Vec<u8>), AppError> {
        let application = self.get_authorized(id, user, role).await?;

        if application.proposal_file_name.as_deref() != Some(file_name) {
            return Err(AppError::NotFound(format!(
                "Application {} has no proposal file named {}",
                id, file_name
            )));
        }

        let data = application.proposal_file_data.ok_or_else(|| {
            AppError::NotFound(format!("Application {} has no stored proposal file", id))
        })?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data.as_bytes())
            .map_err(|e| {
                AppError::InternalError(format!(
                    "Stored proposal for application {} is not valid base64: {}",
                    id, e
                ))
            })?;

        let content_type = application
            .proposal_file_type
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Ok((content_type, bytes))
    }
}
