//! Domain models and operation-specific parameter types.
//!
//! These types sit between the HTTP DTO layer and the entity layer: role and
//! status enums parsed from stored strings, the application status transition
//! table, the sign-off tally, and parameter structs passed from controllers
//! into services.

pub mod application;
pub mod document;
pub mod grant_call;
pub mod project;
pub mod signoff;
pub mod status;
pub mod user;
