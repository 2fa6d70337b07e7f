use super::*;

/// Tests that provided tags replace the existing set and other fields stay.
///
/// Expected: new status, old title, tags replaced
#[tokio::test]
async fn replaces_tags_and_keeps_unset_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_task_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let task = factory::task::TaskFactory::new(db, user.id)
        .title("Keep me")
        .tag("old")
        .tag("stale")
        .build()
        .await?;

    let (updated, tags) = TaskRepository::new(db)
        .update(UpdateTaskParams {
            id: task.id,
            title: None,
            description: None,
            status: Some(TaskStatus::Done),
            priority: None,
            due_date: None,
            tags: Some(vec!["fresh".to_string()]),
        })
        .await?
        .expect("task exists");

    assert_eq!(updated.title, "Keep me");
    assert_eq!(updated.status, "done");
    assert_eq!(tag_names(&tags), vec!["fresh"]);

    Ok(())
}

/// Expected: tags untouched when `tags` is None
#[tokio::test]
async fn leaves_tags_when_not_provided() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_task_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let task = factory::task::TaskFactory::new(db, user.id)
        .tag("keep")
        .build()
        .await?;

    let (_, tags) = TaskRepository::new(db)
        .update(UpdateTaskParams {
            id: task.id,
            title: Some("Renamed".to_string()),
            description: None,
            status: None,
            priority: None,
            due_date: None,
            tags: None,
        })
        .await?
        .expect("task exists");

    assert_eq!(tag_names(&tags), vec!["keep"]);

    Ok(())
}
