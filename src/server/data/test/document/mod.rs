use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::data::document::{DocumentFilter, DocumentRepository};

mod add_version;
mod get_all;
