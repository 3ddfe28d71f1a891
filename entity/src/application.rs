use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A researcher's submission against a grant call.
///
/// Carries the full status workflow (`status` is parsed into
/// `ApplicationStatus` at the repository boundary) plus the embedded review
/// history, reviewer assignment tokens, and the multi-approver sign-off
/// workflow that gates award issuance. File payloads (proposal, award
/// letter) are stored base64-encoded on the row itself.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    /// Snapshot of the grant call deadline at submission time; gates
    /// withdrawal.
    pub deadline: Option<DateTime<Utc>>,
    pub revision_count: i32,
    pub original_submission_date: Option<DateTime<Utc>>,
    pub is_editable: bool,
    pub proposal_file_name: Option<String>,
    pub proposal_file_size: Option<i64>,
    pub proposal_file_type: Option<String>,
    /// Base64-encoded proposal file contents.
    pub proposal_file_data: Option<String>,
    pub biodata: Option<super::user::Biodata>,
    pub review_history: ReviewHistory,
    pub assigned_reviewers: Option<AssignedReviewers>,
    pub review_tokens: Option<ReviewTokens>,
    pub signoff_workflow: Option<SignoffWorkflow>,
    pub award_letter_generated: bool,
    pub award_letter_generated_at: Option<DateTime<Utc>>,
    pub award_letter_file_name: Option<String>,
    pub award_letter_file_type: Option<String>,
    pub award_letter_file_data: Option<String>,
    pub contract_file_name: Option<String>,
    /// Last decision recorded by a manager alongside review comments.
    pub final_decision: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One reviewer feedback entry in the application's review history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReviewEntry {
    pub id: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
    pub comments: String,
    pub submitted_at: DateTime<Utc>,
    /// Application status at (or resulting from) this review.
    pub status: String,
}

/// Append-only review history stored as one JSON column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReviewHistory(pub Vec<ReviewEntry>);

/// Reviewer emails assigned by a grants manager.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct AssignedReviewers(pub Vec<String>);

/// Access token issued to an external reviewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReviewToken {
    pub email: String,
    pub token: String,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReviewTokens(pub Vec<ReviewToken>);

/// One approver's slot in the sign-off workflow (DORI, DVC or VC).
///
/// `status` is `"pending"`, `"approved"` or `"rejected"`; the token is the
/// unauthenticated capability the approver uses to view and decide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SignoffApproval {
    pub role: String,
    pub email: String,
    pub name: String,
    pub token: String,
    pub status: String,
    pub comments: Option<String>,
    pub approver_name: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Multi-approver sign-off tally gating award issuance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SignoffWorkflow {
    /// `"pending"`, `"approved"` or `"rejected"`.
    pub status: String,
    pub award_amount: f64,
    pub approvals: Vec<SignoffApproval>,
    pub initiated_by: String,
    pub initiated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grant_call::Entity",
        from = "Column::GrantCallId",
        to = "super::grant_call::Column::Id"
    )]
    GrantCall,
    #[sea_orm(has_many = "super::project::Entity")]
    Project,
}

impl Related<super::grant_call::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GrantCall.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
