use crate::server::{
    data::grant_call::GrantCallRepository,
    model::grant_call::{GrantCallFilter, GrantCallStatus},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod close_expired;
mod get_all;
