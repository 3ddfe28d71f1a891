use super::*;

/// Tests a plain status change.
///
/// Expected: Ok(Some) with the new status and is_editable false
#[tokio::test]
async fn sets_status_without_comments() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;

    let result = ApplicationRepository::new(db)
        .set_status(application.id, ApplicationStatus::UnderReview, None)
        .await;

    assert!(result.is_ok());
    let updated = result.unwrap().unwrap();
    assert_eq!(updated.status, "under_review");
    assert!(!updated.is_editable);
    assert!(updated.review_comments.is_none());
    assert!(updated.final_decision.is_none());

    Ok(())
}

/// Tests a status change carrying manager comments.
///
/// Verifies that the comments and the final decision are recorded next to
/// the new status.
///
/// Expected: Ok(Some) with review_comments and final_decision set
#[tokio::test]
async fn records_comments_and_final_decision() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;

    let updated = ApplicationRepository::new(db)
        .set_status(
            application.id,
            ApplicationStatus::Rejected,
            Some("Budget is out of scope for this call".to_string()),
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, "rejected");
    assert_eq!(
        updated.review_comments.as_deref(),
        Some("Budget is out of scope for this call")
    );
    assert_eq!(updated.final_decision.as_deref(), Some("rejected"));

    Ok(())
}

/// Tests that moving to an editable status unlocks the application.
///
/// Expected: Ok(Some) with is_editable true
#[tokio::test]
async fn editable_status_unlocks_application() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;

    let updated = ApplicationRepository::new(db)
        .set_status(application.id, ApplicationStatus::NeedsRevision, None)
        .await?
        .unwrap();

    assert_eq!(updated.status, "needs_revision");
    assert!(updated.is_editable);

    Ok(())
}

/// Tests a status change on a non-existent application.
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

    let result = ApplicationRepository::new(db)
        .set_status(999, ApplicationStatus::UnderReview, None)
        .await?;

    assert!(result.is_none());

    Ok(())
}
