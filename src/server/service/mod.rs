//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls
//! - **Domain Models**: Working with domain models rather than DTOs
//! - **State machine enforcement**: All status changes go through the
//!   transition table here, never in handlers

pub mod application;
pub mod auth;
pub mod award;
pub mod document;
pub mod grant_call;
pub mod project;
pub mod reviewer;
pub mod signoff;
pub mod token;
pub mod user;
