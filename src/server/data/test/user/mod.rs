use crate::server::{
    data::user::UserRepository,
    model::user::{CreateUserParams, Role, UpdateUserParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find_by_email;
mod update;
mod update_biodata;
