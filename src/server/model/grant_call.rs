use chrono::{DateTime, Utc};

use crate::model::grant_call::GrantCallDto;

/// Publication status of a grant call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantCallStatus {
    Open,
    Closed,
}

impl GrantCallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Open" => Some(Self::Open),
            "Closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

pub struct CreateGrantCallParams {
    pub title: String,
    pub grant_type: String,
    pub sponsor: String,
    pub scope: String,
    pub status: GrantCallStatus,
    pub deadline: DateTime<Utc>,
    pub eligibility: String,
    pub requirements: String,
    pub visibility: String,
}

#[derive(Default)]
pub struct UpdateGrantCallParams {
    pub title: Option<String>,
    pub grant_type: Option<String>,
    pub sponsor: Option<String>,
    pub scope: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub eligibility: Option<String>,
    pub requirements: Option<String>,
    pub visibility: Option<String>,
}

/// Optional listing filters.
#[derive(Default)]
pub struct GrantCallFilter {
    pub grant_type: Option<String>,
    pub open_only: bool,
}

pub fn into_dto(model: entity::grant_call::Model) -> GrantCallDto {
    GrantCallDto {
        id: model.id,
        title: model.title,
        grant_type: model.grant_type,
        sponsor: model.sponsor,
        scope: model.scope,
        status: model.status,
        deadline: model.deadline,
        eligibility: model.eligibility,
        requirements: model.requirements,
        visibility: model.visibility,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_open_and_closed() {
        assert_eq!(GrantCallStatus::Open.toggled(), GrantCallStatus::Closed);
        assert_eq!(GrantCallStatus::Closed.toggled(), GrantCallStatus::Open);
    }

    #[test]
    fn parses_stored_status_strings() {
        assert_eq!(GrantCallStatus::parse("Open"), Some(GrantCallStatus::Open));
        assert_eq!(GrantCallStatus::parse("open"), None);
    }
}
