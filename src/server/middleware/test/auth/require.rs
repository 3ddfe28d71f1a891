use super::*;

/// Tests an authenticated request with no role requirement.
///
/// Expected: Ok with the token subject's user returned
#[tokio::test]
async fn resolves_active_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let state = test_state(db);
    let headers = bearer_headers(&state, &user.email);

    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().id, user.id);

    Ok(())
}

/// Tests a request without an Authorization header.
///
/// Expected: Err(MissingToken)
#[tokio::test]
async fn rejects_missing_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let state = test_state(db);
    let headers = HeaderMap::new();

    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a request with a token signed by a different secret.
///
/// Expected: Err(InvalidToken)
#[tokio::test]
async fn rejects_foreign_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let state = test_state(db);

    let other = AppState::new(
        db.clone(),
        TokenService::new("other-secret", Duration::minutes(30), Duration::days(7)),
    );
    let headers = bearer_headers(&other, &user.email);

    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    Ok(())
}

/// Tests a valid token whose subject no longer exists.
///
/// Expected: Err(UserNotInDatabase)
#[tokio::test]
async fn rejects_unknown_subject() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let state = test_state(db);
    let headers = bearer_headers(&state, "ghost@grants.edu");

    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(_)))
    ));

    Ok(())
}

/// Tests a deactivated account with a valid token.
///
/// Expected: Err(AccountInactive) regardless of role
#[tokio::test]
async fn rejects_inactive_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .role("Admin")
        .status("disabled")
        .build()
        .await?;
    let state = test_state(db);
    let headers = bearer_headers(&state, &user.email);

    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive))
    ));

    Ok(())
}

/// Tests a researcher hitting a manager-only endpoint.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn denies_researcher_manager_endpoint() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let state = test_state(db);
    let headers = bearer_headers(&state, &user.email);

    let result = AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests a grants manager hitting a manager-only endpoint.
///
/// Expected: Ok
#[tokio::test]
async fn allows_manager_through_manager_requirement() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user_with_role(db, "Grants Manager").await?;
    let state = test_state(db);
    let headers = bearer_headers(&state, &user.email);

    let result = AuthGuard::new(&state, &headers)
        .require(&[Permission::GrantsManager])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests that an admin satisfies every role requirement.
///
/// Expected: Ok for both manager-only and admin-only requirements
#[tokio::test]
async fn admin_satisfies_all_requirements() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user_with_role(db, "Admin").await?;
    let state = test_state(db);
    let headers = bearer_headers(&state, &user.email);

    let guard = AuthGuard::new(&state, &headers);
    assert!(guard.require(&[Permission::GrantsManager]).await.is_ok());
    assert!(guard.require(&[Permission::Admin]).await.is_ok());

    Ok(())
}
