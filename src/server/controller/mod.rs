//! HTTP request handlers.
//!
//! Controllers validate access via `AuthGuard`, convert DTOs to parameter
//! models, call the service layer, and convert results back to DTOs. No
//! business logic lives here.

pub mod application;
pub mod auth;
pub mod document;
pub mod grant_call;
pub mod project;
pub mod reviewer;
pub mod user;
