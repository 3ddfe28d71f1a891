use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory,
    factory::helpers::create_project_with_dependencies,
};

use crate::server::data::project::ProjectRepository;

mod find_by_closure_token;
mod flag_overdue_milestones;
mod get_for_applications;
