//! Multi-approver award sign-off workflow.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::model::application::SignoffApproverDto;
use crate::server::{
    data::application::ApplicationRepository,
    error::AppError,
    model::{
        signoff::{self, SignoffDecision, SignoffTally, WorkflowOutcome, SIGNOFF_PENDING},
        status::ApplicationStatus,
    },
    service::application::parse_status,
    util::random,
};

const SIGNOFF_TOKEN_LENGTH: usize = 32;

pub struct IssuedToken {
    pub role: String,
    pub email: String,
    pub token: String,
}

pub struct SignoffService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SignoffService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Starts the sign-off workflow on a `manager_approved` application:
    /// one pending entry with an unguessable token per approver, and the
    /// application moves to `awaiting_signoff`.
    pub async fn initiate(
        &self,
        application_id: i32,
        initiated_by: &str,
        award_amount: f64,
        approvers: Vec<SignoffApproverDto>,
    ) -> Result<Vec<IssuedToken>, AppError> {
        if approvers.is_empty() {
            return Err(AppError::BadRequest(
                "At least one approver is required".to_string(),
            ));
        }

        let repo = ApplicationRepository::new(self.db);
        let application = repo
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", application_id))
            })?;

        let from = parse_status(&application)?;
        if !ApplicationStatus::can_transition(from, ApplicationStatus::AwaitingSignoff) {
            return Err(AppError::BadRequest(format!(
                "Sign-off can only be initiated on a manager-approved application, not {}",
                from.as_str()
            )));
        }

        let now = Utc::now();
        let mut issued = Vec::with_capacity(approvers.len());
        let approvals = approvers
            .into_iter()
            .map(|approver| {
                let token = random::alphanumeric_token(SIGNOFF_TOKEN_LENGTH);
                issued.push(IssuedToken {
                    role: approver.role.clone(),
                    email: approver.email.clone(),
                    token: token.clone(),
                });
                entity::application::SignoffApproval {
                    role: approver.role,
                    email: approver.email,
                    name: approver.name,
                    token,
                    status: SIGNOFF_PENDING.to_string(),
                    comments: None,
                    approver_name: None,
                    approved_at: None,
                    created_at: now,
                }
            })
            .collect();

        let workflow = entity::application::SignoffWorkflow {
            status: SIGNOFF_PENDING.to_string(),
            award_amount,
            approvals,
            initiated_by: initiated_by.to_string(),
            initiated_at: now,
        };

        repo.set_signoff_workflow(application_id, workflow, ApplicationStatus::AwaitingSignoff)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", application_id))
            })?;

        Ok(issued)
    }

    /// Token-holder view: the application plus that approver's entry.
    pub async fn view_by_token(
        &self,
        token: &str,
    ) -> Result<
        (
            entity::application::Model,
            entity::application::SignoffApproval,
        ),
        AppError,
    > {
        let application = ApplicationRepository::new(self.db)
            .find_by_signoff_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid sign-off token".to_string()))?;

        let approval = application
            .signoff_workflow
            .as_ref()
            .and_then(|wf| wf.approvals.iter().find(|a| a.token == token))
            .cloned()
            .ok_or_else(|| AppError::NotFound("Invalid sign-off token".to_string()))?;

        Ok((application, approval))
    }

    /// Records an approver's decision and retallies the workflow. A token
    /// whose entry was already decided is refused.
    pub async fn submit_decision(
        &self,
        token: &str,
        decision: SignoffDecision,
        comments: Option<String>,
        approver_name: Option<String>,
    ) -> Result<entity::application::Model, AppError> {
        let repo = ApplicationRepository::new(self.db);

        let application = repo
            .find_by_signoff_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid sign-off token".to_string()))?;

        let mut workflow = application
            .signoff_workflow
            .clone()
            .ok_or_else(|| AppError::NotFound("Invalid sign-off token".to_string()))?;

        let approval = workflow
            .approvals
            .iter_mut()
            .find(|a| a.token == token)
            .ok_or_else(|| AppError::NotFound("Invalid sign-off token".to_string()))?;

        if approval.status != SIGNOFF_PENDING {
            return Err(AppError::Conflict(
                "This sign-off token has already been used".to_string(),
            ));
        }

        approval.status = decision.as_str().to_string();
        approval.comments = comments;
        approval.approver_name = approver_name;
        approval.approved_at = Some(Utc::now());

        let tally = signoff::tally(&workflow);
        workflow.status = tally.outcome.as_str().to_string();

        let application_status = match tally.outcome {
            WorkflowOutcome::Approved => ApplicationStatus::SignoffApproved,
            WorkflowOutcome::Rejected => ApplicationStatus::Rejected,
            WorkflowOutcome::Pending => ApplicationStatus::AwaitingSignoff,
        };

        repo.set_signoff_workflow(application.id, workflow, application_status)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", application.id))
            })
    }

    /// Completed/total counts plus the current workflow status.
    pub async fn status(&self, application_id: i32) -> Result<SignoffTally, AppError> {
        let application = ApplicationRepository::new(self.db)
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", application_id))
            })?;

        let workflow = application.signoff_workflow.as_ref().ok_or_else(|| {
            AppError::NotFound(format!(
                "Application {} has no sign-off workflow",
                application_id
            ))
        })?;

        Ok(signoff::tally(workflow))
    }
}
