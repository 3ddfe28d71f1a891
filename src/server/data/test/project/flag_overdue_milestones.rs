use super::*;
use entity::project::{Milestone, Milestones};

fn milestone(id: &str, due_in_days: i64) -> Milestone {
    Milestone {
        id: id.to_string(),
        title: format!("Milestone {}", id),
        description: "Deliverable".to_string(),
        due_date: Utc::now() + Duration::days(due_in_days),
        status: "pending".to_string(),
        progress_report_uploaded: false,
        progress_report_date: None,
        progress_report_filename: None,
        is_overdue: false,
    }
}

/// Tests the overdue milestone sweep.
///
/// Verifies that a past-due pending milestone is flagged while completed
/// milestones, milestones with an uploaded progress report, and milestones
/// that are not yet due are left alone.
///
/// Expected: Ok(1) with only the past-due pending milestone flagged
#[tokio::test]
async fn flags_only_past_due_pending_milestones() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_project_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, project) = create_project_with_dependencies(db).await?;

    let mut completed = milestone("m2", -10);
    completed.status = "completed".to_string();
    let mut reported = milestone("m3", -10);
    reported.progress_report_uploaded = true;

    let repo = ProjectRepository::new(db);
    repo.update_milestones(
        project.id,
        Milestones(vec![
            milestone("m1", -5),
            completed,
            reported,
            milestone("m4", 5),
        ]),
    )
    .await?;

    let flagged = repo.flag_overdue_milestones(Utc::now()).await?;

    assert_eq!(flagged, 1);

    let project = repo.find_by_id(project.id).await?.unwrap();
    let overdue: Vec<&str> = project
        .milestones
        .0
        .iter()
        .filter(|m| m.is_overdue)
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(overdue, vec!["m1"]);

    Ok(())
}

/// Tests that milestones on inactive projects are not swept.
///
/// Expected: Ok(0) for a completed project with a past-due milestone
#[tokio::test]
async fn skips_inactive_projects() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_project_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application, _) = create_project_with_dependencies(db).await?;
    factory::project::ProjectFactory::new(db, application.id)
        .status("completed")
        .milestones(Milestones(vec![milestone("m1", -5)]))
        .build()
        .await?;

    let flagged = ProjectRepository::new(db)
        .flag_overdue_milestones(Utc::now())
        .await?;

    assert_eq!(flagged, 0);

    Ok(())
}

/// Tests that an already-flagged milestone is not counted again.
///
/// Expected: Ok(0) on the second sweep
#[tokio::test]
async fn does_not_reflag_milestones() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_project_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, project) = create_project_with_dependencies(db).await?;

    let repo = ProjectRepository::new(db);
    repo.update_milestones(project.id, Milestones(vec![milestone("m1", -5)]))
        .await?;

    assert_eq!(repo.flag_overdue_milestones(Utc::now()).await?, 1);
    assert_eq!(repo.flag_overdue_milestones(Utc::now()).await?, 0);

    Ok(())
}
