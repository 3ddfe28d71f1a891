use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: i32,
    pub application_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budget: Option<f64>,
    pub principal_investigator: Option<String>,
    pub team_members: Option<Vec<String>>,
    pub milestones: Vec<MilestoneDto>,
    pub requisitions: Vec<RequisitionDto>,
    pub partners: Vec<PartnerDto>,
    pub final_report: Option<FinalReportDto>,
    pub closure_workflow: Option<ClosureWorkflowDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectDto {
    pub application_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budget: Option<f64>,
    pub team_members: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub status: String,
    pub progress_report_uploaded: bool,
    pub progress_report_date: Option<DateTime<Utc>>,
    pub progress_report_filename: Option<String>,
    pub is_overdue: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneCreateDto {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneUpdateDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReportDto {
    pub file_name: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionDto {
    pub id: String,
    pub milestone_id: String,
    pub amount: f64,
    pub notes: String,
    pub requested_date: DateTime<Utc>,
    pub status: String,
    pub reviewed_by: Option<String>,
    pub reviewed_date: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionCreateDto {
    pub milestone_id: String,
    pub amount: f64,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionReviewDto {
    /// Either `approved` or `rejected`.
    pub status: String,
    pub review_notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerDto {
    pub id: String,
    pub name: String,
    pub role: String,
    pub mou_filename: Option<String>,
    pub uploaded_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerCreateDto {
    pub name: String,
    pub role: String,
    pub mou_filename: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalReportDto {
    pub narrative_report: Option<String>,
    pub financial_report: Option<String>,
    pub status: String,
    pub submitted_date: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub reviewed_date: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalReportUploadDto {
    pub narrative_report: Option<String>,
    pub financial_report: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalReportReviewDto {
    /// Either `approved` or `rejected`.
    pub status: String,
    pub review_notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosureWorkflowDto {
    pub status: String,
    pub vc_signed_by: Option<String>,
    pub vc_signed_date: Option<DateTime<Utc>>,
    pub vc_notes: Option<String>,
    pub closure_certificate_generated: bool,
    pub closure_certificate_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosureInitiatedDto {
    pub message: String,
    pub vc_sign_off_token: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VcSignoffSubmissionDto {
    /// Either `approved` or `rejected`.
    pub decision: String,
    pub notes: Option<String>,
    pub vc_name: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusDto {
    pub status: String,
}
