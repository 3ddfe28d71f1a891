use super::*;

/// Tests deleting an existing user.
///
/// Expected: Ok(true) and the user no longer findable
#[tokio::test]
async fn deletes_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::create_user(db).await?;

    let repo = UserRepository::new(db);
    let deleted = repo.delete(created.id).await?;

    assert!(deleted);
    assert!(repo.find_by_id(created.id).await?.is_none());

    Ok(())
}

/// Tests deleting a non-existent user.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = UserRepository::new(db).delete(999).await?;

    assert!(!deleted);

    Ok(())
}
