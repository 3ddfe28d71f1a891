use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrantCallDto {
    pub id: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub grant_type: String,
    pub sponsor: String,
    pub scope: String,
    pub status: String,
    pub deadline: DateTime<Utc>,
    pub eligibility: String,
    pub requirements: String,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrantCallDto {
    pub title: String,
    #[serde(rename = "type")]
    pub grant_type: String,
    pub sponsor: String,
    pub scope: String,
    pub status: Option<String>,
    pub deadline: DateTime<Utc>,
    pub eligibility: String,
    pub requirements: String,
    pub visibility: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGrantCallDto {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub grant_type: Option<String>,
    pub sponsor: Option<String>,
    pub scope: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub eligibility: Option<String>,
    pub requirements: Option<String>,
    pub visibility: Option<String>,
}
