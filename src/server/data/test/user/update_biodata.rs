use super::*;

/// Tests replacing a user's biodata profile.
///
/// Verifies that the profile is stored as a free-form JSON object and that
/// keys outside the frontend's conventional set survive the round trip.
///
/// Expected: Ok(Some(User)) with every submitted key persisted
#[tokio::test]
async fn stores_free_form_profile() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::create_user(db).await?;

    let mut profile = serde_json::Map::new();
    profile.insert("name".to_string(), serde_json::json!("Dr. A"));
    profile.insert("institution".to_string(), serde_json::json!("Uni X"));
    profile.insert("orcid".to_string(), serde_json::json!("0000-0002"));

    let repo = UserRepository::new(db);
    let result = repo
        .update_biodata(created.id, entity::user::Biodata(profile))
        .await;

    assert!(result.is_ok());
    let stored = result.unwrap().unwrap().biodata.unwrap();
    assert_eq!(stored.0.get("name"), Some(&serde_json::json!("Dr. A")));
    assert_eq!(
        stored.0.get("institution"),
        Some(&serde_json::json!("Uni X"))
    );
    assert_eq!(stored.0.get("orcid"), Some(&serde_json::json!("0000-0002")));

    Ok(())
}

/// Tests updating biodata on a non-existent user.
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
        .update_biodata(999, entity::user::Biodata::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
