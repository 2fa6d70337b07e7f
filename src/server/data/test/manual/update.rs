use super::*;
use crate::model::manual::AccessLevel;

/// Expected: changed fields stored, others untouched
#[tokio::test]
async fn applies_partial_update() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_manual_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manual = factory::manual::ManualFactory::new(db, author.id)
        .title("Onboarding")
        .category("hr")
        .build()
        .await?;

    let updated = ManualRepository::new(db)
        .update(UpdateManualParams {
            id: manual.id,
            title: None,
            content: Some("New content".to_string()),
            department: None,
            category: Some(None),
            access_level: Some(AccessLevel::Private),
            edit_permission: None,
        })
        .await?
        .expect("manual exists");

    assert_eq!(updated.title, "Onboarding");
    assert_eq!(updated.content, "New content");
    assert_eq!(updated.category, None);
    assert_eq!(updated.access_level, "private");
    assert_eq!(updated.edit_permission, manual.edit_permission);

    Ok(())
}

/// Expected: Ok(true) then not found
#[tokio::test]
async fn deletes_manual() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_manual_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manual = factory::manual::ManualFactory::new(db, author.id).build().await?;

    let repo = ManualRepository::new(db);
    assert!(repo.delete(manual.id).await?);
    assert!(repo.find_by_id(manual.id).await?.is_none());

    Ok(())
}
