use super::*;
use entity::project::ClosureWorkflow;

fn workflow(token: &str) -> ClosureWorkflow {
    ClosureWorkflow {
        status: "pending".to_string(),
        vc_sign_off_token: token.to_string(),
        vc_signed_by: None,
        vc_signed_date: None,
        vc_notes: None,
        closure_certificate_generated: false,
        closure_certificate_date: None,
    }
}

/// Tests finding a project by its VC sign-off token.
///
/// Expected: Ok(Some) with the project holding the token
#[tokio::test]
async fn finds_project_for_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_project_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, project) = create_project_with_dependencies(db).await?;
    create_project_with_dependencies(db).await?;

    let repo = ProjectRepository::new(db);
    repo.set_closure_workflow(project.id, workflow("vc-token-abc"), None)
        .await?;

    let result = repo.find_by_closure_token("vc-token-abc").await;

    assert!(result.is_ok());
    let found = result.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, project.id);

    Ok(())
}

/// Tests looking up an unknown closure token.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_project_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, project) = create_project_with_dependencies(db).await?;

    let repo = ProjectRepository::new(db);
    repo.set_closure_workflow(project.id, workflow("vc-token-abc"), None)
        .await?;

    let found = repo.find_by_closure_token("vc-token-xyz").await?;

    assert!(found.is_none());

    Ok(())
}
