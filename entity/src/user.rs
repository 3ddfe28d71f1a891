use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account record for every person who can log in.
///
/// The `role` and `status` columns hold the canonical strings
/// (`"Researcher"`, `"Grants Manager"`, `"Admin"` and `"active"`,
/// `"disabled"`); they are parsed into enums at the repository boundary.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub role: String,
    pub status: String,
    pub password_hash: String,
    /// Free-form researcher profile attached to the account.
    pub biodata: Option<Biodata>,
    pub created_at: DateTime<Utc>,
}

/// Researcher profile embedded on the user record.
///
/// Stored as a free-form JSON object: arbitrary keys round-trip unchanged.
/// Keys like `name`, `age`, and `firstTimeApplicant` are conventions of the
/// frontend, not a schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Biodata(pub serde_json::Map<String, serde_json::Value>);

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
