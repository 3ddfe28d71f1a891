//! Award letter generation and the applicant's accept/decline response.

use base64::Engine;
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::application::ApplicationRepository,
    error::AppError,
    model::{status::ApplicationStatus, user::Role},
    service::application::parse_status,
};

const LETTER_CONTENT_TYPE: &str = "text/html";

pub struct AwardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AwardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Renders and stores the award letter for a sign-off-approved
    /// application, moving it to `award_pending_acceptance`. Idempotent: a
    /// second call returns the already-generated letter.
    pub async fn generate_letter(
        &self,
        application_id: i32,
    ) -> Result<entity::application::Model, AppError> {
        let repo = ApplicationRepository::new(self.db);

        let application = repo
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", application_id))
            })?;

        if application.award_letter_generated {
            return Ok(application);
        }

        let from = parse_status(&application)?;
        if !ApplicationStatus::can_transition(from, ApplicationStatus::AwardPendingAcceptance) {
            return Err(AppError::BadRequest(format!(
                "An award letter requires a sign-off-approved application, not {}",
                from.as_str()
            )));
        }

        let award_amount = application
            .signoff_workflow
            .as_ref()
            .map(|wf| wf.award_amount)
            .unwrap_or_default();

        let html = render_letter(&application, award_amount);
        let encoded = base64::engine::general_purpose::STANDARD.encode(html.as_bytes());
        let file_name = format!("award-letter-{}.html", application.id);

        repo.store_award_letter(
            application_id,
            file_name,
            LETTER_CONTENT_TYPE.to_string(),
            encoded,
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {} not found", application_id)))
    }

    /// Fetches the stored award letter for download; applicant or
    /// managers/admins.
    pub async fn letter(
        &self,
        application_id: i32,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<(String, String, Vec<u8>), AppError> {
        let application = ApplicationRepository::new(self.db)
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", application_id))
            })?;

        if role == Role::Researcher && application.email != user.email {
            return Err(AppError::Forbidden(
                "You do not have access to this award letter".to_string(),
            ));
        }

        let (Some(file_name), Some(file_type), Some(data)) = (
            application.award_letter_file_name,
            application.award_letter_file_type,
            application.award_letter_file_data,
        ) else {
            return Err(AppError::NotFound(format!(
                "Application {} has no award letter",
                application_id
            )));
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data.as_bytes())
            .map_err(|e| {
                AppError::InternalError(format!(
                    "Stored award letter for application {} is not valid base64: {}",
                    application_id, e
                ))
            })?;

        Ok((file_name, file_type, bytes))
    }

    /// Records the applicant's accept/decline decision on a pending award.
    pub async fn respond(
        &self,
        application_id: i32,
        user: &entity::user::Model,
        accepted: bool,
    ) -> Result<entity::application::Model, AppError> {
        let repo = ApplicationRepository::new(self.db);

        let application = repo
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", application_id))
            })?;

        if application.email != user.email {
            return Err(AppError::Forbidden(
                "Only the applicant can respond to this award".to_string(),
            ));
        }

        let from = parse_status(&application)?;
        let to = if accepted {
            ApplicationStatus::AwardAccepted
        } else {
            ApplicationStatus::AwardRejected
        };

        if !ApplicationStatus::can_transition(from, to) {
            return Err(AppError::BadRequest(format!(
                "An application in status {} has no pending award to respond to",
                from.as_str()
            )));
        }

        repo.set_status(application_id, to, None)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", application_id))
            })
    }
}

/// Renders the award letter HTML from the application and the sign-off
/// award amount.
fn render_letter(application: &entity::application::Model, award_amount: f64) -> String {
    let date = Utc::now().format("%B %e, %Y");
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Award Letter</title></head>\n<body>\n\
         <p>{date}</p>\n\
         <p>Dear {name},</p>\n\
         <p>We are pleased to inform you that your proposal\n\
         <strong>{title}</strong> has been approved for funding in the amount of\n\
         <strong>${amount:.2}</strong>.</p>\n\
         <p>Please respond to this award through the grants portal to begin\n\
         contract processing.</p>\n\
         <p>Sincerely,<br>Office of Research and Innovation</p>\n\
         </body>\n</html>\n",
        date = date,
        name = application.applicant_name,
        title = application.proposal_title,
        amount = award_amount,
    )
}
