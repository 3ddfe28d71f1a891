use super::*;

/// Tests filtering documents by folder.
///
/// Expected: Ok with only documents in that folder
#[tokio::test]
async fn filters_by_folder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Document)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::document::DocumentFactory::new(db)
        .folder("Applications")
        .build()
        .await?;
    let report = factory::document::DocumentFactory::new(db)
        .folder("Reports")
        .build()
        .await?;

    let result = DocumentRepository::new(db)
        .get_all(DocumentFilter {
            folder: Some("Reports".to_string()),
            ..Default::default()
        })
        .await;

    assert!(result.is_ok());
    let documents = result.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, report.id);

    Ok(())
}

/// Tests filtering documents by owner.
///
/// Expected: Ok with only that owner's documents
#[tokio::test]
async fn filters_by_created_by() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Document)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mine = factory::document::DocumentFactory::new(db)
        .created_by("researcher@grants.edu")
        .build()
        .await?;
    factory::document::create_document(db).await?;

    let documents = DocumentRepository::new(db)
        .get_all(DocumentFilter {
            created_by: Some("researcher@grants.edu".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, mine.id);

    Ok(())
}

/// Tests the case-insensitive substring search.
///
/// Verifies that the search matches over document names and tags.
///
/// Expected: Ok with documents matching on either field
#[tokio::test]
async fn searches_names_and_tags() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Document)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let by_name = factory::document::DocumentFactory::new(db)
        .name("Solar Budget Plan")
        .build()
        .await?;
    let by_tag = factory::document::DocumentFactory::new(db)
        .name("Quarterly Report")
        .tags(vec!["budget".to_string()])
        .build()
        .await?;
    factory::document::DocumentFactory::new(db)
        .name("Meeting Notes")
        .build()
        .await?;

    let documents = DocumentRepository::new(db)
        .get_all(DocumentFilter {
            search: Some("BUDGET".to_string()),
            ..Default::default()
        })
        .await?;

    let mut ids: Vec<i32> = documents.into_iter().map(|d| d.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![by_name.id, by_tag.id]);

    Ok(())
}
