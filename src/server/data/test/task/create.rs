use super::*;

/// Tests inserting a task together with its tags.
///
/// Expected: task row and one tag row per tag
#[tokio::test]
async fn creates_task_with_tags() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_task_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let (task, tags) = TaskRepository::new(db)
        .create(CreateTaskParams {
            user_id: user.id,
            organization_id: None,
            title: "Write report".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            due_date: None,
            tags: vec!["q3".to_string(), "finance".to_string()],
        })
        .await?;

    assert_eq!(task.title, "Write report");
    assert_eq!(task.priority, "high");
    assert_eq!(tag_names(&tags), vec!["finance", "q3"]);

    let (found, found_tags) = TaskRepository::new(db)
        .find_by_id(task.id)
        .await?
        .expect("task exists");
    assert_eq!(found.id, task.id);
    assert_eq!(found_tags.len(), 2);

    Ok(())
}

/// Tests that deleting a task removes its tags.
///
/// Expected: Ok(true) then nothing found
#[tokio::test]
async fn delete_removes_task() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_task_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let task = factory::task::TaskFactory::new(db, user.id)
        .tag("cleanup")
        .build()
        .await?;

    let repo = TaskRepository::new(db);
    assert!(repo.delete(task.id).await?);
    assert!(repo.find_by_id(task.id).await?.is_none());
    assert!(!repo.delete(task.id).await?);

    Ok(())
}
