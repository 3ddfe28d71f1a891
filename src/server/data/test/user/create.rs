use super::*;

/// Tests creating a new user.
///
/// Verifies that the user repository successfully creates a user record
/// with the given name, email, role, and password hash.
///
/// Expected: Ok with user created and status set to active
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .create(CreateUserParams {
            name: "Sarah Chen".to_string(),
            email: "sarah.chen@grants.edu".to_string(),
            password_hash: "$2b$12$test-hash".to_string(),
            role: Role::Researcher,
        })
        .await;

    assert!(result.is_ok());
    let user = result.unwrap();
    assert_eq!(user.name, "Sarah Chen");
    assert_eq!(user.email, "sarah.chen@grants.edu");
    assert_eq!(user.role, "Researcher");
    assert_eq!(user.status, "active");
    assert!(user.biodata.is_none());

    Ok(())
}

/// Tests that the stored role string matches the role's display form.
///
/// Expected: Ok with the role stored as "Grants Manager"
#[tokio::test]
async fn stores_role_display_string() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserRepository::new(db)
        .create(CreateUserParams {
            name: "Manager".to_string(),
            email: "manager@grants.edu".to_string(),
            password_hash: "$2b$12$test-hash".to_string(),
            role: Role::GrantsManager,
        })
        .await?;

    assert_eq!(user.role, "Grants Manager");

    Ok(())
}
