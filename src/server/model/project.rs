use chrono::{DateTime, Utc};

use crate::model::project::{
    ClosureWorkflowDto, FinalReportDto, MilestoneDto, PartnerDto, ProjectDto, RequisitionDto,
};

pub const MILESTONE_PENDING: &str = "pending";
pub const MILESTONE_COMPLETED: &str = "completed";

pub const REQUISITION_PENDING: &str = "pending";
pub const REQUISITION_APPROVED: &str = "approved";
pub const REQUISITION_REJECTED: &str = "rejected";

pub const REPORT_SUBMITTED: &str = "submitted";
pub const REPORT_APPROVED: &str = "approved";
pub const REPORT_REJECTED: &str = "rejected";

/// Lifecycle status of a funded project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    Completed,
    Terminated,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Terminated => "terminated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "terminated" => Some(Self::Terminated),
            _ => None,
        }
    }
}

pub struct CreateProjectParams {
    pub application_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budget: Option<f64>,
    pub principal_investigator: Option<String>,
    pub team_members: Option<Vec<String>>,
}

pub fn milestone_to_dto(milestone: entity::project::Milestone) -> MilestoneDto {
    MilestoneDto {
        id: milestone.id,
        title: milestone.title,
        description: milestone.description,
        due_date: milestone.due_date,
        status: milestone.status,
        progress_report_uploaded: milestone.progress_report_uploaded,
        progress_report_date: milestone.progress_report_date,
        progress_report_filename: milestone.progress_report_filename,
        is_overdue: milestone.is_overdue,
    }
}

pub fn requisition_to_dto(requisition: entity::project::Requisition) -> RequisitionDto {
    RequisitionDto {
        id: requisition.id,
        milestone_id: requisition.milestone_id,
        amount: requisition.amount,
        notes: requisition.notes,
        requested_date: requisition.requested_date,
        status: requisition.status,
        reviewed_by: requisition.reviewed_by,
        reviewed_date: requisition.reviewed_date,
        review_notes: requisition.review_notes,
    }
}

pub fn partner_to_dto(partner: entity::project::Partner) -> PartnerDto {
    PartnerDto {
        id: partner.id,
        name: partner.name,
        role: partner.role,
        mou_filename: partner.mou_filename,
        uploaded_date: partner.uploaded_date,
    }
}

pub fn final_report_to_dto(report: entity::project::FinalReport) -> FinalReportDto {
    FinalReportDto {
        narrative_report: report.narrative_report,
        financial_report: report.financial_report,
        status: report.status,
        submitted_date: report.submitted_date,
        reviewed_by: report.reviewed_by,
        reviewed_date: report.reviewed_date,
        review_notes: report.review_notes,
    }
}

/// Converts the closure workflow for API output. The VC sign-off token is
/// deliberately omitted; it is only returned once, at initiation.
pub fn closure_workflow_to_dto(workflow: entity::project::ClosureWorkflow) -> ClosureWorkflowDto {
    ClosureWorkflowDto {
        status: workflow.status,
        vc_signed_by: workflow.vc_signed_by,
        vc_signed_date: workflow.vc_signed_date,
        vc_notes: workflow.vc_notes,
        closure_certificate_generated: workflow.closure_certificate_generated,
        closure_certificate_date: workflow.closure_certificate_date,
    }
}

pub fn into_dto(model: entity::project::Model) -> ProjectDto {
    ProjectDto {
        id: model.id,
        application_id: model.application_id,
        title: model.title,
        description: model.description,
        status: model.status,
        start_date: model.start_date,
        end_date: model.end_date,
        budget: model.budget,
        principal_investigator: model.principal_investigator,
        team_members: model.team_members.map(|t| t.0),
        milestones: model.milestones.0.into_iter().map(milestone_to_dto).collect(),
        requisitions: model
            .requisitions
            .0
            .into_iter()
            .map(requisition_to_dto)
            .collect(),
        partners: model.partners.0.into_iter().map(partner_to_dto).collect(),
        final_report: model.final_report.map(final_report_to_dto),
        closure_workflow: model.closure_workflow.map(closure_workflow_to_dto),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
