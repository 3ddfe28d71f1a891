//! SeaORM entity models for the grants management database.
//!
//! Each module defines one table. Embedded sub-records (review history,
//! sign-off approvals, milestones, requisitions, document versions, ...) are
//! stored as typed JSON columns so they stay schema-checked at the boundary
//! while remaining a single document per row, matching how the workflows
//! treat them.

pub mod application;
pub mod document;
pub mod grant_call;
pub mod prelude;
pub mod project;
pub mod user;
