use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{grant_call::GrantCallRepository, project::ProjectRepository},
    error::AppError,
};

/// Starts the deadline housekeeping scheduler
///
/// This scheduler runs every minute and checks for:
/// - Open grant calls whose submission deadline has passed (closed automatically)
/// - Active project milestones past their due date without a progress report
///   (flagged overdue)
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    // Clone resources for the job
    let job_db = db.clone();

    // Schedule job to run every minute
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            if let Err(e) = process_deadlines(&db).await {
                tracing::error!("Error processing deadlines: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Deadline housekeeping scheduler started");

    Ok(())
}

/// Processes grant call closures and milestone overdue flags
async fn process_deadlines(db: &DatabaseConnection) -> Result<(), AppError> {
    let now = Utc::now();

    if let Err(e) = close_expired_grant_calls(db, now).await {
        tracing::error!("Error closing expired grant calls: {}", e);
    }

    if let Err(e) = flag_overdue_milestones(db, now).await {
        tracing::error!("Error flagging overdue milestones: {}", e);
    }

    Ok(())
}

/// Closes open grant calls whose deadline has passed
async fn close_expired_grant_calls(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let closed = GrantCallRepository::new(db).close_expired(now).await?;

    if closed > 0 {
        tracing::info!("Closed {} expired grant calls", closed);
    }

    Ok(())
}

/// Flags active project milestones past their due date without a progress
/// report
async fn flag_overdue_milestones(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let flagged = ProjectRepository::new(db)
        .flag_overdue_milestones(now)
        .await?;

    if flagged > 0 {
        tracing::info!("Flagged {} overdue milestones", flagged);
    }

    Ok(())
}
