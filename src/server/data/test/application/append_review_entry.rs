use super::*;

fn entry(comments: &str) -> entity::application::ReviewEntry {
    entity::application::ReviewEntry {
        id: "review-1".to_string(),
        reviewer_name: "Prof. Okafor".to_string(),
        reviewer_email: "okafor@reviews.edu".to_string(),
        comments: comments.to_string(),
        submitted_at: Utc::now(),
        status: "under_review".to_string(),
    }
}

/// Tests appending a review entry without a status change.
///
/// Expected: Ok(Some) with the entry in the history and status untouched
#[tokio::test]
async fn appends_entry_to_history() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;

    let result = ApplicationRepository::new(db)
        .append_review_entry(application.id, entry("Strong methodology"), None)
        .await;

    assert!(result.is_ok());
    let updated = result.unwrap().unwrap();
    assert_eq!(updated.review_history.0.len(), 1);
    assert_eq!(updated.review_history.0[0].comments, "Strong methodology");
    assert_eq!(updated.status, "submitted");

    Ok(())
}

/// Tests appending a review entry together with a status transition.
///
/// Expected: Ok(Some) with history grown and the new status applied
#[tokio::test]
async fn applies_status_alongside_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;

    let updated = ApplicationRepository::new(db)
        .append_review_entry(
            application.id,
            entry("Needs a tighter budget"),
            Some(ApplicationStatus::NeedsRevision),
        )
        .await?
        .unwrap();

    assert_eq!(updated.review_history.0.len(), 1);
    assert_eq!(updated.status, "needs_revision");
    assert!(updated.is_editable);

    Ok(())
}

/// Tests that the history is append-only across calls.
///
/// Expected: Ok(Some) with both entries in submission order
#[tokio::test]
async fn preserves_earlier_entries() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;

    let repo = ApplicationRepository::new(db);
    repo.append_review_entry(application.id, entry("First pass"), None)
        .await?;
    let updated = repo
        .append_review_entry(application.id, entry("Second pass"), None)
        .await?
        .unwrap();

    assert_eq!(updated.review_history.0.len(), 2);
    assert_eq!(updated.review_history.0[0].comments, "First pass");
    assert_eq!(updated.review_history.0[1].comments, "Second pass");

    Ok(())
}
