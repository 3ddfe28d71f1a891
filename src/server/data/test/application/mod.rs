use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory,
    factory::helpers::create_application_with_dependencies,
};

use crate::server::{
    data::application::ApplicationRepository,
    model::{application::ApplicationFilter, status::ApplicationStatus},
};

mod append_review_entry;
mod find_by_review_token;
mod find_by_signoff_token;
mod get_all;
mod resubmit;
mod set_status;
