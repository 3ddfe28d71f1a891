use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Funded project created from an accepted application.
///
/// Milestones, fund requisitions, partners, the final report and the closure
/// workflow live as typed JSON columns on the row, mirroring the embedded
/// sub-records the workflows operate on.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub application_id: i32,
    pub title: String,
    pub description: Option<String>,
    /// `"active"`, `"completed"` or `"terminated"`.
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budget: Option<f64>,
    pub principal_investigator: Option<String>,
    pub team_members: Option<TeamMembers>,
    pub milestones: Milestones,
    pub requisitions: Requisitions,
    pub partners: Partners,
    pub final_report: Option<FinalReport>,
    pub closure_workflow: Option<ClosureWorkflow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TeamMembers(pub Vec<String>);

/// Deliverable checkpoint within a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    /// `"pending"`, `"in_progress"` or `"completed"`.
    pub status: String,
    pub progress_report_uploaded: bool,
    pub progress_report_date: Option<DateTime<Utc>>,
    pub progress_report_filename: Option<String>,
    pub is_overdue: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Milestones(pub Vec<Milestone>);

/// Fund release request tied to a milestone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Requisition {
    pub id: String,
    pub milestone_id: String,
    pub amount: f64,
    pub notes: String,
    pub requested_date: DateTime<Utc>,
    /// `"pending"`, `"approved"` or `"rejected"`.
    pub status: String,
    pub reviewed_by: Option<String>,
    pub reviewed_date: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Requisitions(pub Vec<Requisition>);

/// Collaborating partner attached to the project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub role: String,
    pub mou_filename: Option<String>,
    pub uploaded_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Partners(pub Vec<Partner>);

/// Narrative + financial closure report for a finished project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct FinalReport {
    pub narrative_report: Option<String>,
    pub financial_report: Option<String>,
    /// `"draft"`, `"submitted"`, `"approved"` or `"rejected"`.
    pub status: String,
    pub submitted_date: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub reviewed_date: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

/// VC sign-off state for closing the project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ClosureWorkflow {
    /// `"pending"`, `"signed_off"` or `"rejected"`.
    pub status: String,
    pub vc_sign_off_token: String,
    pub vc_signed_by: Option<String>,
    pub vc_signed_date: Option<DateTime<Utc>>,
    pub vc_notes: Option<String>,
    pub closure_certificate_generated: bool,
    pub closure_certificate_date: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::application::Entity",
        from = "Column::ApplicationId",
        to = "super::application::Column::Id"
    )]
    Application,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
