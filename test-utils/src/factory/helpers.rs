//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique test identifiers across all factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an application with all its dependencies.
///
/// This is a convenience method that creates:
/// 1. User (as the applicant, role Researcher)
/// 2. Grant call (open)
/// 3. Application submitted by the user against the call
///
/// All entities are created with default values. Use the individual
/// factories if you need to customize specific entities.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, grant_call, application))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_application_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::grant_call::Model,
        entity::application::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let grant_call = crate::factory::grant_call::create_grant_call(db).await?;

    let application = crate::factory::application::ApplicationFactory::new(db, grant_call.id)
        .email(&user.email)
        .applicant_name(&user.name)
        .build()
        .await?;

    Ok((user, grant_call, application))
}

/// Creates a project with all its dependencies.
///
/// Creates a user, grant call, application, and a project tied to that
/// application.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, grant_call, application, project))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_project_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::grant_call::Model,
        entity::application::Model,
        entity::project::Model,
    ),
    DbErr,
> {
    let (user, grant_call, application) = create_application_with_dependencies(db).await?;
    let project = crate::factory::project::create_project(db, application.id).await?;

    Ok((user, grant_call, application, project))
}
