use crate::model::application::{
    ApplicationDto, CreateApplicationDto, ReviewEntryDto, SignoffApprovalDto, SignoffWorkflowDto,
    UpdateApplicationDto,
};
use crate::server::model::user::{biodata_from_dto, biodata_to_dto};

/// Validated parameters for a new application submission. Built from the DTO
/// plus the authenticated applicant's identity.
pub struct CreateApplicationParams {
    pub grant_call_id: i32,
    pub applicant_name: String,
    pub email: String,
    pub proposal_title: String,
    pub institution: Option<String>,
    pub department: Option<String>,
    pub project_summary: Option<String>,
    pub objectives: Option<String>,
    pub methodology: Option<String>,
    pub expected_outcomes: Option<String>,
    pub budget_amount: Option<f64>,
    pub budget_justification: Option<String>,
    pub timeline: Option<String>,
    pub proposal_file_name: Option<String>,
    pub proposal_file_size: Option<i64>,
    pub proposal_file_type: Option<String>,
    pub proposal_file_data: Option<String>,
    pub biodata: Option<entity::user::Biodata>,
}

impl CreateApplicationParams {
    pub fn from_dto(dto: CreateApplicationDto, applicant: &entity::user::Model) -> Self {
        Self {
            grant_call_id: dto.grant_call_id,
            applicant_name: dto.applicant_name.unwrap_or_else(|| applicant.name.clone()),
            email: applicant.email.clone(),
            proposal_title: dto.proposal_title,
            institution: dto.institution,
            department: dto.department,
            project_summary: dto.project_summary,
            objectives: dto.objectives,
            methodology: dto.methodology,
            expected_outcomes: dto.expected_outcomes,
            budget_amount: dto.budget_amount,
            budget_justification: dto.budget_justification,
            timeline: dto.timeline,
            proposal_file_name: dto.proposal_file_name,
            proposal_file_size: dto.proposal_file_size,
            proposal_file_type: dto.proposal_file_type,
            proposal_file_data: dto.proposal_file_data,
            biodata: dto.biodata.map(biodata_from_dto),
        }
    }
}

#[derive(Default)]
pub struct UpdateApplicationParams {
    pub proposal_title: Option<String>,
    pub institution: Option<String>,
    pub department: Option<String>,
    pub project_summary: Option<String>,
    pub objectives: Option<String>,
    pub methodology: Option<String>,
    pub expected_outcomes: Option<String>,
    pub budget_amount: Option<f64>,
    pub budget_justification: Option<String>,
    pub timeline: Option<String>,
    pub proposal_file_name: Option<String>,
    pub proposal_file_size: Option<i64>,
    pub proposal_file_type: Option<String>,
    pub proposal_file_data: Option<String>,
    pub biodata: Option<entity::user::Biodata>,
}

impl UpdateApplicationParams {
    pub fn from_dto(dto: UpdateApplicationDto) -> Self {
        Self {
            proposal_title: dto.proposal_title,
            institution: dto.institution,
            department: dto.department,
            project_summary: dto.project_summary,
            objectives: dto.objectives,
            methodology: dto.methodology,
            expected_outcomes: dto.expected_outcomes,
            budget_amount: dto.budget_amount,
            budget_justification: dto.budget_justification,
            timeline: dto.timeline,
            proposal_file_name: dto.proposal_file_name,
            proposal_file_size: dto.proposal_file_size,
            proposal_file_type: dto.proposal_file_type,
            proposal_file_data: dto.proposal_file_data,
            biodata: dto.biodata.map(biodata_from_dto),
        }
    }
}

/// Optional listing filters.
#[derive(Default)]
pub struct ApplicationFilter {
    pub status: Option<String>,
    pub grant_call_id: Option<i32>,
    pub email: Option<String>,
}

pub fn review_entry_to_dto(entry: entity::application::ReviewEntry) -> ReviewEntryDto {
    ReviewEntryDto {
        id: entry.id,
        reviewer_name: entry.reviewer_name,
        reviewer_email: entry.reviewer_email,
        comments: entry.comments,
        submitted_at: entry.submitted_at,
        status: entry.status,
    }
}

pub fn signoff_approval_to_dto(approval: entity::application::SignoffApproval) -> SignoffApprovalDto {
    SignoffApprovalDto {
        role: approval.role,
        email: approval.email,
        name: approval.name,
        status: approval.status,
        comments: approval.comments,
        approver_name: approval.approver_name,
        approved_at: approval.approved_at,
        created_at: approval.created_at,
    }
}

pub fn signoff_workflow_to_dto(
    workflow: entity::application::SignoffWorkflow,
) -> SignoffWorkflowDto {
    SignoffWorkflowDto {
        status: workflow.status,
        award_amount: workflow.award_amount,
        approvals: workflow
            .approvals
            .into_iter()
            .map(signoff_approval_to_dto)
            .collect(),
        initiated_by: workflow.initiated_by,
        initiated_at: workflow.initiated_at,
    }
}

/// Converts an application entity into its DTO form. Stored file payloads
/// (proposal, award letter) are never included; downloads go through the
/// dedicated endpoints.
pub fn into_dto(model: entity::application::Model) -> ApplicationDto {
    ApplicationDto {
        id: model.id,
        grant_call_id: model.grant_call_id,
        applicant_name: model.applicant_name,
        email: model.email,
        proposal_title: model.proposal_title,
        institution: model.institution,
        department: model.department,
        project_summary: model.project_summary,
        objectives: model.objectives,
        methodology: model.methodology,
        expected_outcomes: model.expected_outcomes,
        budget_amount: model.budget_amount,
        budget_justification: model.budget_justification,
        timeline: model.timeline,
        status: model.status,
        submission_date: model.submission_date,
        review_comments: model.review_comments,
        deadline: model.deadline,
        revision_count: model.revision_count,
        original_submission_date: model.original_submission_date,
        is_editable: model.is_editable,
        proposal_file_name: model.proposal_file_name,
        proposal_file_size: model.proposal_file_size,
        proposal_file_type: model.proposal_file_type,
        biodata: model.biodata.map(biodata_to_dto),
        review_history: model
            .review_history
            .0
            .into_iter()
            .map(review_entry_to_dto)
            .collect(),
        assigned_reviewers: model.assigned_reviewers.map(|r| r.0),
        signoff_workflow: model.signoff_workflow.map(signoff_workflow_to_dto),
        award_letter_generated: model.award_letter_generated,
        award_letter_generated_at: model.award_letter_generated_at,
        contract_file_name: model.contract_file_name,
        final_decision: model.final_decision,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
