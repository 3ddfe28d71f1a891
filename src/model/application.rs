use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::BiodataDto;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDto {
    pub id: i32,
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
    pub status: String,
    pub submission_date: DateTime<Utc>,
    pub review_comments: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub revision_count: i32,
    pub original_submission_date: Option<DateTime<Utc>>,
    pub is_editable: bool,
    pub proposal_file_name: Option<String>,
    pub proposal_file_size: Option<i64>,
    pub proposal_file_type: Option<String>,
    pub biodata: Option<BiodataDto>,
    pub review_history: Vec<ReviewEntryDto>,
    pub assigned_reviewers: Option<Vec<String>>,
    pub signoff_workflow: Option<SignoffWorkflowDto>,
    pub award_letter_generated: bool,
    pub award_letter_generated_at: Option<DateTime<Utc>>,
    pub contract_file_name: Option<String>,
    pub final_decision: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationDto {
    pub grant_call_id: i32,
    pub applicant_name: Option<String>,
    pub email: Option<String>,
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
    /// Base64-encoded proposal file content.
    pub proposal_file_data: Option<String>,
    pub biodata: Option<BiodataDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationDto {
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
    pub biodata: Option<BiodataDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct StatusUpdateDto {
    pub status: String,
    pub comments: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntryDto {
    pub id: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
    pub comments: String,
    pub submitted_at: DateTime<Utc>,
    pub status: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreateDto {
    pub reviewer_name: String,
    pub reviewer_email: String,
    pub comments: String,
    /// Optional status transition recorded together with the feedback.
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractUploadDto {
    pub file_name: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalFileDto {
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    /// Base64-encoded file content.
    pub content: String,
}

// --- Sign-off workflow ---

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignoffApprovalDto {
    pub role: String,
    pub email: String,
    pub name: String,
    pub status: String,
    pub comments: Option<String>,
    pub approver_name: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignoffWorkflowDto {
    pub status: String,
    pub award_amount: f64,
    pub approvals: Vec<SignoffApprovalDto>,
    pub initiated_by: String,
    pub initiated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignoffApproverDto {
    pub role: String,
    pub email: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignoffInitiateDto {
    pub award_amount: f64,
    pub approvers: Vec<SignoffApproverDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignoffTokenDto {
    pub role: String,
    pub email: String,
    pub token: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignoffInitiatedDto {
    pub message: String,
    pub sign_off_tokens: Vec<SignoffTokenDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignoffDecisionDto {
    /// Either `approved` or `rejected`.
    pub decision: String,
    pub comments: Option<String>,
    pub approver_name: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignoffViewDto {
    pub application: ApplicationDto,
    pub approval: SignoffApprovalDto,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignoffStatusDto {
    pub current_status: String,
    pub completed_approvals: usize,
    pub total_approvals: usize,
}

// --- Award letters ---

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardLetterDto {
    pub file_name: String,
    pub file_type: String,
    /// Base64-encoded letter content.
    pub content: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardResponseDto {
    /// Either `accepted` or `declined`.
    pub decision: String,
}

// --- External reviewers ---

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignReviewersDto {
    pub reviewer_emails: Vec<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTokenDto {
    pub email: String,
    pub token: String,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewersAssignedDto {
    pub message: String,
    pub reviewer_count: usize,
    pub review_tokens: Vec<ReviewTokenDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerFeedbackDto {
    pub application_id: i32,
    pub feedback: Vec<ReviewEntryDto>,
}
