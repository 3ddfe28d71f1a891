use super::*;

fn version(file_name: &str) -> entity::document::DocumentVersion {
    entity::document::DocumentVersion {
        id: "v2".to_string(),
        version_number: 0,
        file_name: file_name.to_string(),
        file_type: "application/pdf".to_string(),
        file_data: "dXBkYXRlZA==".to_string(),
        file_size: 7,
        uploaded_by: "manager@grants.edu".to_string(),
        uploaded_at: Utc::now(),
        notes: Some("Revised after review".to_string()),
    }
}

/// Tests appending a new version to a document.
///
/// Verifies that the version list grows, the current version is bumped,
/// and the stored version number is assigned by the repository.
///
/// Expected: Ok(Some) with current_version 2 and the new version numbered 2
#[tokio::test]
async fn appends_version_and_bumps_current() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Document)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let document = factory::document::create_document(db).await?;

    let result = DocumentRepository::new(db)
        .add_version(document.id, version("proposal-v2.pdf"))
        .await;

    assert!(result.is_ok());
    let updated = result.unwrap().unwrap();
    assert_eq!(updated.current_version, 2);
    assert_eq!(updated.versions.0.len(), 2);
    assert_eq!(updated.versions.0[1].version_number, 2);
    assert_eq!(updated.versions.0[1].file_name, "proposal-v2.pdf");

    Ok(())
}

/// Tests adding a version to a non-existent document.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_document() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Document)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = DocumentRepository::new(db)
        .add_version(999, version("proposal-v2.pdf"))
        .await?;

    assert!(result.is_none());

    Ok(())
}
