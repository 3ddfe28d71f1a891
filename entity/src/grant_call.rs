use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Funding opportunity that applications are submitted against.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grant_call")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// Grant category (ORI, External, Scholarship, Travel/Conference, ...).
    pub grant_type: String,
    pub sponsor: String,
    pub scope: String,
    /// `"Open"` or `"Closed"`.
    pub status: String,
    pub deadline: DateTime<Utc>,
    pub eligibility: String,
    pub requirements: String,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application::Entity")]
    Application,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
