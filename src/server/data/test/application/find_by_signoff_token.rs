use super::*;

fn workflow(token: &str) -> entity::application::SignoffWorkflow {
    let now = Utc::now();
    entity::application::SignoffWorkflow {
        status: "pending".to_string(),
        award_amount: 50_000.0,
        approvals: vec![entity::application::SignoffApproval {
            role: "DORI".to_string(),
            email: "dori@grants.edu".to_string(),
            name: "Director of Research and Innovation".to_string(),
            token: token.to_string(),
            status: "pending".to_string(),
            comments: None,
            approver_name: None,
            approved_at: None,
            created_at: now,
        }],
        initiated_by: "manager@grants.edu".to_string(),
        initiated_at: now,
    }
}

/// Tests finding an application by a sign-off approver token.
///
/// Expected: Ok(Some) with the application whose workflow holds the token
#[tokio::test]
async fn finds_application_for_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application) = create_application_with_dependencies(db).await?;
    create_application_with_dependencies(db).await?;

    let repo = ApplicationRepository::new(db);
    repo.set_signoff_workflow(
        application.id,
        workflow("signoff-token-abc"),
        ApplicationStatus::AwaitingSignoff,
    )
    .await?;

    let result = repo.find_by_signoff_token("signoff-token-abc").await;

    assert!(result.is_ok());
    let found = result.unwrap().unwrap();
    assert_eq!(found.id, application.id);
    assert_eq!(found.status, "awaiting_signoff");

    Ok(())
}

/// Tests looking up an unknown sign-off token.
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
    repo.set_signoff_workflow(
        application.id,
        workflow("signoff-token-abc"),
        ApplicationStatus::AwaitingSignoff,
    )
    .await?;

    let found = repo.find_by_signoff_token("signoff-token-xyz").await?;

    assert!(found.is_none());

    Ok(())
}
