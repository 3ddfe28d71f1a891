use super::*;

/// Tests a partial update of name and status.
///
/// Verifies that only the provided fields change and the rest are
/// preserved.
///
/// Expected: Ok(Some(User)) with updated name and status, role unchanged
#[tokio::test]
async fn updates_provided_fields_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::create_user(db).await?;

    let result = UserRepository::new(db)
        .update(
            created.id,
            UpdateUserParams {
                name: Some("Renamed User".to_string()),
                role: None,
                status: Some("disabled".to_string()),
            },
        )
        .await;

    assert!(result.is_ok());
    let updated = result.unwrap().unwrap();
    assert_eq!(updated.name, "Renamed User");
    assert_eq!(updated.status, "disabled");
    assert_eq!(updated.role, created.role);

    Ok(())
}

/// Tests changing a user's role.
///
/// Expected: Ok(Some(User)) with the new role stored as its display string
#[tokio::test]
async fn updates_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::create_user(db).await?;

    let updated = UserRepository::new(db)
        .update(
            created.id,
            UpdateUserParams {
                role: Some(Role::GrantsManager),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.role, "Grants Manager");

    Ok(())
}

/// Tests updating a non-existent user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update(
            999,
            UpdateUserParams {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_none());

    Ok(())
}
