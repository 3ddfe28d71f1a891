use super::*;

/// Tests resubmitting a returned application.
///
/// Verifies that the status goes back to submitted, the revision count is
/// bumped, the submission date is refreshed, and the original submission
/// date is preserved.
///
/// Expected: Ok(Some) with revision_count 1 and the original date intact
#[tokio::test]
async fn resubmits_returned_application() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;
    let first_submission = application.submission_date;

    let repo = ApplicationRepository::new(db);
    repo.set_status(application.id, ApplicationStatus::NeedsRevision, None)
        .await?;

    let resubmitted = repo.resubmit(application.id).await?.unwrap();

    assert_eq!(resubmitted.status, "submitted");
    assert!(!resubmitted.is_editable);
    assert_eq!(resubmitted.revision_count, 1);
    assert!(resubmitted.submission_date >= first_submission);
    assert_eq!(resubmitted.original_submission_date, Some(first_submission));

    Ok(())
}

/// Tests that repeated resubmissions keep counting.
///
/// Expected: Ok(Some) with revision_count 2 after two resubmissions
#[tokio::test]
async fn increments_revision_count_each_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;

    let repo = ApplicationRepository::new(db);
    repo.resubmit(application.id).await?;
    let resubmitted = repo.resubmit(application.id).await?.unwrap();

    assert_eq!(resubmitted.revision_count, 2);

    Ok(())
}

/// Tests resubmitting a non-existent application.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_application() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ApplicationRepository::new(db).resubmit(999).await?;

    assert!(result.is_none());

    Ok(())
}
