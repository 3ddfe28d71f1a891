use super::*;

/// Tests scoping projects to a set of applications.
///
/// Used to limit researcher project listings to their own applications.
///
/// Expected: Ok with only the project tied to the given application
#[tokio::test]
async fn returns_projects_for_given_applications() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_project_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, application, project) = create_project_with_dependencies(db).await?;
    create_project_with_dependencies(db).await?;

    let result = ProjectRepository::new(db)
        .get_for_applications(vec![application.id])
        .await;

    assert!(result.is_ok());
    let projects = result.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, project.id);

    Ok(())
}

/// Tests the empty input short-circuit.
///
/// Expected: Ok with an empty list and no query issued
#[tokio::test]
async fn returns_empty_for_no_applications() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_project_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_project_with_dependencies(db).await?;

    let projects = ProjectRepository::new(db)
        .get_for_applications(Vec::new())
        .await?;

    assert!(projects.is_empty());

    Ok(())
}
