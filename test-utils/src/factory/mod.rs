//! Entity factories for constructing test fixtures.
//!
//! Each factory inserts one entity with sensible defaults that individual
//! tests can override through the builder methods.

pub mod application;
pub mod document;
pub mod grant_call;
pub mod helpers;
pub mod project;
pub mod user;
