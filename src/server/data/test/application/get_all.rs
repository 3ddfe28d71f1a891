use super::*;

/// Tests filtering applications by status.
///
/// Expected: Ok with only applications in that status
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, grant_call, _) = create_application_with_dependencies(db).await?;
    let under_review = factory::application::ApplicationFactory::new(db, grant_call.id)
        .status("under_review")
        .build()
        .await?;

    let result = ApplicationRepository::new(db)
        .get_all(ApplicationFilter {
            status: Some("under_review".to_string()),
            ..Default::default()
        })
        .await;

    assert!(result.is_ok());
    let applications = result.unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].id, under_review.id);

    Ok(())
}

/// Tests filtering applications by applicant email.
///
/// Used to scope researcher listings to their own submissions.
///
/// Expected: Ok with only that applicant's applications
#[tokio::test]
async fn filters_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, grant_call, application) = create_application_with_dependencies(db).await?;
    factory::application::ApplicationFactory::new(db, grant_call.id)
        .email("someone.else@grants.edu")
        .build()
        .await?;

    let applications = ApplicationRepository::new(db)
        .get_all(ApplicationFilter {
            email: Some(user.email),
            ..Default::default()
        })
        .await?;

    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].id, application.id);

    Ok(())
}

/// Tests filtering applications by grant call.
///
/// Expected: Ok with only applications against that call
#[tokio::test]
async fn filters_by_grant_call() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, first_call, first) = create_application_with_dependencies(db).await?;
    let (_, _, _) = create_application_with_dependencies(db).await?;

    let applications = ApplicationRepository::new(db)
        .get_all(ApplicationFilter {
            grant_call_id: Some(first_call.id),
            ..Default::default()
        })
        .await?;

    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].id, first.id);

    Ok(())
}
