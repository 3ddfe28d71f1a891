use super::*;

/// Tests filtering grant calls by grant type.
///
/// Expected: Ok with only the matching call returned
#[tokio::test]
async fn filters_by_grant_type() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GrantCall)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::grant_call::GrantCallFactory::new(db)
        .grant_type("ORI")
        .build()
        .await?;
    let external = factory::grant_call::GrantCallFactory::new(db)
        .grant_type("External")
        .build()
        .await?;

    let result = GrantCallRepository::new(db)
        .get_all(GrantCallFilter {
            grant_type: Some("External".to_string()),
            open_only: false,
        })
        .await;

    assert!(result.is_ok());
    let calls = result.unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, external.id);

    Ok(())
}

/// Tests the open-only filter.
///
/// Expected: Ok with closed calls excluded
#[tokio::test]
async fn filters_to_open_calls() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GrantCall)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let open = factory::grant_call::GrantCallFactory::new(db)
        .status("Open")
        .build()
        .await?;
    factory::grant_call::GrantCallFactory::new(db)
        .status("Closed")
        .build()
        .await?;

    let calls = GrantCallRepository::new(db)
        .get_all(GrantCallFilter {
            grant_type: None,
            open_only: true,
        })
        .await?;

    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, open.id);

    Ok(())
}

/// Tests that calls come back ordered by deadline, newest first.
///
/// Expected: Ok with the later deadline first
#[tokio::test]
async fn orders_by_deadline_descending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GrantCall)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let near = factory::grant_call::GrantCallFactory::new(db)
        .deadline(Utc::now() + Duration::days(7))
        .build()
        .await?;
    let far = factory::grant_call::GrantCallFactory::new(db)
        .deadline(Utc::now() + Duration::days(60))
        .build()
        .await?;

    let calls = GrantCallRepository::new(db)
        .get_all(GrantCallFilter::default())
        .await?;

    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].id, far.id);
    assert_eq!(calls[1].id, near.id);

    Ok(())
}
