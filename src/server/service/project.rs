//! Funded project management: milestones, requisitions, partners, final
//! reports, and VC closure sign-off.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::model::project::{
    CreateProjectDto, MilestoneCreateDto, MilestoneUpdateDto, PartnerCreateDto,
};
use crate::server::{
    data::{application::ApplicationRepository, project::ProjectRepository},
    error::AppError,
    model::{
        application::ApplicationFilter,
        project::{
            CreateProjectParams, ProjectStatus, MILESTONE_PENDING, REPORT_APPROVED,
            REPORT_REJECTED, REPORT_SUBMITTED, REQUISITION_APPROVED, REQUISITION_PENDING,
            REQUISITION_REJECTED,
        },
        signoff::{SIGNOFF_APPROVED, SIGNOFF_PENDING, SIGNOFF_REJECTED},
        status::ApplicationStatus,
        user::Role,
    },
    service::application::parse_status,
    util::random,
};

const CLOSURE_TOKEN_LENGTH: usize = 32;
const ID_LENGTH: usize = 16;

pub struct ProjectService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a project from an accepted application. The principal
    /// investigator defaults to the applicant; the budget defaults to the
    /// signed-off award amount.
    pub async fn create(&self, dto: CreateProjectDto) -> Result<entity::project::Model, AppError> {
        let application = ApplicationRepository::new(self.db)
            .find_by_id(dto.application_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Application {} not found", dto.application_id))
            })?;

        let status = parse_status(&application)?;
        if !matches!(
            status,
            ApplicationStatus::AwardAccepted
                | ApplicationStatus::ContractPending
                | ApplicationStatus::ContractReceived
        ) {
            return Err(AppError::BadRequest(format!(
                "A project requires an accepted award; the application is {}",
                status.as_str()
            )));
        }

        let budget = dto.budget.or_else(|| {
            application
                .signoff_workflow
                .as_ref()
                .map(|wf| wf.award_amount)
        });

        Ok(ProjectRepository::new(self.db)
            .create(CreateProjectParams {
                application_id: application.id,
                title: dto.title,
                description: dto.description,
                start_date: dto.start_date,
                end_date: dto.end_date,
                budget,
                principal_investigator: Some(application.applicant_name),
                team_members: dto.team_members,
            })
            .await?)
    }

    /// Gets projects visible to the caller: researchers see projects whose
    /// source application carries their email, managers and admins see all.
    pub async fn get_visible(
        &self,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<Vec<entity::project::Model>, AppError> {
        let repo = ProjectRepository::new(self.db);

        if role != Role::Researcher {
            return Ok(repo.get_all().await?);
        }

        let applications = ApplicationRepository::new(self.db)
            .get_all(ApplicationFilter {
                email: Some(user.email.clone()),
                ..Default::default()
            })
            .await?;

        Ok(repo
            .get_for_applications(applications.into_iter().map(|a| a.id).collect())
            .await?)
    }

    /// Gets one project, enforcing the owner-or-manager access rule via the
    /// source application.
    pub async fn get_authorized(
        &self,
        id: i32,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<entity::project::Model, AppError> {
        let project = ProjectRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        if role == Role::Researcher {
            let application = ApplicationRepository::new(self.db)
                .find_by_id(project.application_id)
                .await?;
            let owns = application.is_some_and(|a| a.email == user.email);
            if !owns {
                return Err(AppError::Forbidden(
                    "You do not have access to this project".to_string(),
                ));
            }
        }

        Ok(project)
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<entity::project::Model, AppError> {
        let status = ProjectStatus::parse(status)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid project status: {}", status)))?;

        ProjectRepository::new(self.db)
            .set_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    // --- Milestones ---

    pub async fn add_milestone(
        &self,
        id: i32,
        dto: MilestoneCreateDto,
    ) -> Result<entity::project::Model, AppError> {
        let repo = ProjectRepository::new(self.db);
        let project = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        let mut milestones = project.milestones;
        milestones.0.push(entity::project::Milestone {
            id: random::alphanumeric_token(ID_LENGTH),
            title: dto.title,
            description: dto.description.unwrap_or_default(),
            due_date: dto.due_date,
            status: MILESTONE_PENDING.to_string(),
            progress_report_uploaded: false,
            progress_report_date: None,
            progress_report_filename: None,
            is_overdue: false,
        });

        repo.update_milestones(id, milestones)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    pub async fn update_milestone(
        &self,
        id: i32,
        milestone_id: &str,
        dto: MilestoneUpdateDto,
    ) -> Result<entity::project::Model, AppError> {
        let repo = ProjectRepository::new(self.db);
        let project = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        let mut milestones = project.milestones;
        let milestone = milestones
            .0
            .iter_mut()
            .find(|m| m.id == milestone_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Milestone {} not found", milestone_id))
            })?;

        if let Some(title) = dto.title {
            milestone.title = title;
        }
        if let Some(description) = dto.description {
            milestone.description = description;
        }
        if let Some(due_date) = dto.due_date {
            milestone.due_date = due_date;
        }
        if let Some(status) = dto.status {
            milestone.status = status;
        }

        repo.update_milestones(id, milestones)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Records a progress report upload on a milestone and clears its
    /// overdue flag.
    pub async fn upload_progress_report(
        &self,
        id: i32,
        milestone_id: &str,
        file_name: String,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<entity::project::Model, AppError> {
        self.get_authorized(id, user, role).await?;

        let repo = ProjectRepository::new(self.db);
        let project = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        let mut milestones = project.milestones;
        let milestone = milestones
            .0
            .iter_mut()
            .find(|m| m.id == milestone_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Milestone {} not found", milestone_id))
            })?;

        milestone.progress_report_uploaded = true;
        milestone.progress_report_date = Some(Utc::now());
        milestone.progress_report_filename = Some(file_name);
        milestone.is_overdue = false;

        repo.update_milestones(id, milestones)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    // --- Fund requisitions ---

    /// Researcher on their own project submits a requisition against a
    /// milestone.
    pub async fn add_requisition(
        &self,
        id: i32,
        milestone_id: String,
        amount: f64,
        notes: Option<String>,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<entity::project::Model, AppError> {
        let project = self.get_authorized(id, user, role).await?;

        if !project.milestones.0.iter().any(|m| m.id == milestone_id) {
            return Err(AppError::NotFound(format!(
                "Milestone {} not found",
                milestone_id
            )));
        }

        let mut requisitions = project.requisitions;
        requisitions.0.push(entity::project::Requisition {
            id: random::alphanumeric_token(ID_LENGTH),
            milestone_id,
            amount,
            notes: notes.unwrap_or_default(),
            requested_date: Utc::now(),
            status: REQUISITION_PENDING.to_string(),
            reviewed_by: None,
            reviewed_date: None,
            review_notes: None,
        });

        ProjectRepository::new(self.db)
            .update_requisitions(id, requisitions)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Manager approves or rejects a pending requisition.
    pub async fn review_requisition(
        &self,
        id: i32,
        requisition_id: &str,
        status: &str,
        review_notes: Option<String>,
        reviewed_by: &str,
    ) -> Result<entity::project::Model, AppError> {
        if status != REQUISITION_APPROVED && status != REQUISITION_REJECTED {
            return Err(AppError::BadRequest(format!(
                "Invalid requisition decision: {}",
                status
            )));
        }

        let repo = ProjectRepository::new(self.db);
        let project = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        let mut requisitions = project.requisitions;
        let requisition = requisitions
            .0
            .iter_mut()
            .find(|r| r.id == requisition_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Requisition {} not found", requisition_id))
            })?;

        if requisition.status != REQUISITION_PENDING {
            return Err(AppError::Conflict(
                "This requisition has already been reviewed".to_string(),
            ));
        }

        requisition.status = status.to_string();
        requisition.review_notes = review_notes;
        requisition.reviewed_by = Some(reviewed_by.to_string());
        requisition.reviewed_date = Some(Utc::now());

        repo.update_requisitions(id, requisitions)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    // --- Partners ---

    pub async fn add_partner(
        &self,
        id: i32,
        dto: PartnerCreateDto,
    ) -> Result<entity::project::Model, AppError> {
        let repo = ProjectRepository::new(self.db);
        let project = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        let mut partners = project.partners;
        let uploaded_date = dto.mou_filename.as_ref().map(|_| Utc::now());
        partners.0.push(entity::project::Partner {
            id: random::alphanumeric_token(ID_LENGTH),
            name: dto.name,
            role: dto.role,
            mou_filename: dto.mou_filename,
            uploaded_date,
        });

        repo.update_partners(id, partners)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    pub async fn remove_partner(
        &self,
        id: i32,
        partner_id: &str,
    ) -> Result<entity::project::Model, AppError> {
        let repo = ProjectRepository::new(self.db);
        let project = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        let mut partners = project.partners;
        let before = partners.0.len();
        partners.0.retain(|p| p.id != partner_id);
        if partners.0.len() == before {
            return Err(AppError::NotFound(format!(
                "Partner {} not found",
                partner_id
            )));
        }

        repo.update_partners(id, partners)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    // --- Final report ---

    /// Owner uploads narrative/financial report parts; resubmission resets
    /// any previous review.
    pub async fn upload_final_report(
        &self,
        id: i32,
        narrative_report: Option<String>,
        financial_report: Option<String>,
        user: &entity::user::Model,
        role: Role,
    ) -> Result<entity::project::Model, AppError> {
        let project = self.get_authorized(id, user, role).await?;

        let mut report = project.final_report.unwrap_or_default();
        if narrative_report.is_some() {
            report.narrative_report = narrative_report;
        }
        if financial_report.is_some() {
            report.financial_report = financial_report;
        }
        report.status = REPORT_SUBMITTED.to_string();
        report.submitted_date = Some(Utc::now());
        report.reviewed_by = None;
        report.reviewed_date = None;
        report.review_notes = None;

        ProjectRepository::new(self.db)
            .set_final_report(id, report)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Manager approves or rejects a submitted final report.
    pub async fn review_final_report(
        &self,
        id: i32,
        status: &str,
        review_notes: Option<String>,
        reviewed_by: &str,
    ) -> Result<entity::project::Model, AppError> {
        if status != REPORT_APPROVED && status != REPORT_REJECTED {
            return Err(AppError::BadRequest(format!(
                "Invalid report decision: {}",
                status
            )));
        }

        let repo = ProjectRepository::new(self.db);
        let project = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        let mut report = project.final_report.ok_or_else(|| {
            AppError::NotFound(format!("Project {} has no final report", id))
        })?;

        report.status = status.to_string();
        report.review_notes = review_notes;
        report.reviewed_by = Some(reviewed_by.to_string());
        report.reviewed_date = Some(Utc::now());

        repo.set_final_report(id, report)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    // --- Closure ---

    /// Manager starts VC closure sign-off; requires an approved final
    /// report. Returns the VC token (only issued here).
    pub async fn initiate_closure(&self, id: i32) -> Result<String, AppError> {
        let repo = ProjectRepository::new(self.db);
        let project = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        let report_approved = project
            .final_report
            .as_ref()
            .is_some_and(|r| r.status == REPORT_APPROVED);
        if !report_approved {
            return Err(AppError::BadRequest(
                "Closure requires an approved final report".to_string(),
            ));
        }

        if project
            .closure_workflow
            .as_ref()
            .is_some_and(|wf| wf.status == SIGNOFF_PENDING)
        {
            return Err(AppError::Conflict(
                "Closure sign-off is already in progress".to_string(),
            ));
        }

        let token = random::alphanumeric_token(CLOSURE_TOKEN_LENGTH);
        let workflow = entity::project::ClosureWorkflow {
            status: SIGNOFF_PENDING.to_string(),
            vc_sign_off_token: token.clone(),
            vc_signed_by: None,
            vc_signed_date: None,
            vc_notes: None,
            closure_certificate_generated: false,
            closure_certificate_date: None,
        };

        repo.set_closure_workflow(id, workflow, None)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

        Ok(token)
    }

    /// Token-holder view of the project awaiting VC sign-off.
    pub async fn closure_view_by_token(
        &self,
        token: &str,
    ) -> Result<entity::project::Model, AppError> {
        ProjectRepository::new(self.db)
            .find_by_closure_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid sign-off token".to_string()))
    }

    /// Records the VC decision. Approval generates the closure certificate
    /// and completes the project; rejection leaves the project active.
    pub async fn submit_closure_decision(
        &self,
        token: &str,
        approved: bool,
        notes: Option<String>,
        vc_name: String,
    ) -> Result<entity::project::Model, AppError> {
        let repo = ProjectRepository::new(self.db);

        let project = repo
            .find_by_closure_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid sign-off token".to_string()))?;

        let mut workflow = project
            .closure_workflow
            .clone()
            .ok_or_else(|| AppError::NotFound("Invalid sign-off token".to_string()))?;

        if workflow.status != SIGNOFF_PENDING {
            return Err(AppError::Conflict(
                "This sign-off token has already been used".to_string(),
            ));
        }

        let now: DateTime<Utc> = Utc::now();
        workflow.vc_signed_by = Some(vc_name);
        workflow.vc_signed_date = Some(now);
        workflow.vc_notes = notes;

        let status = if approved {
            workflow.status = SIGNOFF_APPROVED.to_string();
            workflow.closure_certificate_generated = true;
            workflow.closure_certificate_date = Some(now);
            Some(ProjectStatus::Completed)
        } else {
            workflow.status = SIGNOFF_REJECTED.to_string();
            None
        };

        repo.set_closure_workflow(project.id, workflow, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", project.id)))
    }
}
