use super::*;

/// Tests finding an application by an assigned reviewer token.
///
/// Expected: Ok(Some) with the application carrying the token
#[tokio::test]
async fn finds_application_for_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;
    let (_, grant_call, _) = create_application_with_dependencies(db).await?;
    factory::application::create_application(db, grant_call.id).await?;

    let repo = ApplicationRepository::new(db);
    repo.assign_reviewers(
        application.id,
        entity::application::AssignedReviewers(vec!["okafor@reviews.edu".to_string()]),
        entity::application::ReviewTokens(vec![entity::application::ReviewToken {
            email: "okafor@reviews.edu".to_string(),
            token: "rev-token-abc".to_string(),
            assigned_at: Utc::now(),
        }]),
    )
    .await?;

    let result = repo.find_by_review_token("rev-token-abc").await;

    assert!(result.is_ok());
    let found = result.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, application.id);

    Ok(())
}

/// Tests looking up an unknown reviewer token.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;

    let repo = ApplicationRepository::new(db);
    repo.assign_reviewers(
        application.id,
        entity::application::AssignedReviewers(vec!["okafor@reviews.edu".to_string()]),
        entity::application::ReviewTokens(vec![entity::application::ReviewToken {
            email: "okafor@reviews.edu".to_string(),
            token: "rev-token-abc".to_string(),
            assigned_at: Utc::now(),
        }]),
    )
    .await?;

    let found = repo.find_by_review_token("rev-token-xyz").await?;

    assert!(found.is_none());

    Ok(())
}
