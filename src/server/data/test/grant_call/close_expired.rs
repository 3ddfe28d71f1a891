use super::*;

/// Tests closing calls whose deadline has passed.
///
/// Verifies that only open calls with an elapsed deadline are closed,
/// while future and already-closed calls are left alone.
///
/// Expected: Ok(1) with only the expired open call flipped to Closed
#[tokio::test]
async fn closes_only_expired_open_calls() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GrantCall)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let expired = factory::grant_call::GrantCallFactory::new(db)
        .status("Open")
        .deadline(Utc::now() - Duration::days(1))
        .build()
        .await?;
    let future = factory::grant_call::GrantCallFactory::new(db)
        .status("Open")
        .deadline(Utc::now() + Duration::days(30))
        .build()
        .await?;
    factory::grant_call::GrantCallFactory::new(db)
        .status("Closed")
        .deadline(Utc::now() - Duration::days(10))
        .build()
        .await?;

    let repo = GrantCallRepository::new(db);
    let closed = repo.close_expired(Utc::now()).await?;

    assert_eq!(closed, 1);

    let expired = repo.find_by_id(expired.id).await?.unwrap();
    assert_eq!(expired.status, GrantCallStatus::Closed.as_str());

    let future = repo.find_by_id(future.id).await?.unwrap();
    assert_eq!(future.status, GrantCallStatus::Open.as_str());

    Ok(())
}

/// Tests the sweep with nothing to close.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_when_nothing_expired() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GrantCall)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::grant_call::create_grant_call(db).await?;

    let closed = GrantCallRepository::new(db).close_expired(Utc::now()).await?;

    assert_eq!(closed, 0);

    Ok(())
}
