use super::*;

/// Tests that a user sees their own tasks and tasks of their organizations only.
///
/// Expected: own task and organization task, not the stranger's private task
#[tokio::test]
async fn returns_own_and_organization_tasks() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_task_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, member, organization) =
        factory::helpers::create_organization_with_member(db).await?;
    let stranger = factory::create_user(db).await?;

    let own = factory::create_task(db, member.id).await?;
    let shared = factory::task::TaskFactory::new(db, owner.id)
        .organization_id(organization.id)
        .build()
        .await?;
    factory::create_task(db, owner.id).await?;
    factory::create_task(db, stranger.id).await?;

    let (tasks, total) = TaskRepository::new(db)
        .get_visible_paginated(member.id, &[organization.id], &TaskFilter::default(), 0, 10)
        .await?;

    assert_eq!(total, 2);
    let mut ids: Vec<i32> = tasks.iter().map(|(t, _)| t.id).collect();
    ids.sort();
    assert_eq!(ids, vec![own.id, shared.id]);

    Ok(())
}

/// Tests status, priority and tag filters.
///
/// Expected: only the task matching every filter
#[tokio::test]
async fn applies_filters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_task_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let wanted = factory::task::TaskFactory::new(db, user.id)
        .status("in_progress")
        .priority("urgent")
        .tag("release")
        .build()
        .await?;
    factory::task::TaskFactory::new(db, user.id)
        .status("in_progress")
        .priority("urgent")
        .build()
        .await?;
    factory::task::TaskFactory::new(db, user.id)
        .status("done")
        .tag("release")
        .build()
        .await?;

    let filter = TaskFilter {
        status: Some(TaskStatus::InProgress),
        priority: Some(TaskPriority::Urgent),
        organization_id: None,
        tag: Some("release".to_string()),
    };

    let (tasks, total) = TaskRepository::new(db)
        .get_visible_paginated(user.id, &[], &filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(tasks[0].0.id, wanted.id);
    assert_eq!(tag_names(&tasks[0].1), vec!["release"]);

    Ok(())
}

/// Expected: page size respected and total counts all rows
#[tokio::test]
async fn paginates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_task_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    for _ in 0..5 {
        factory::create_task(db, user.id).await?;
    }

    let repo = TaskRepository::new(db);
    let (first, total) = repo
        .get_visible_paginated(user.id, &[], &TaskFilter::default(), 0, 2)
        .await?;
    let (last, _) = repo
        .get_visible_paginated(user.id, &[], &TaskFilter::default(), 2, 2)
        .await?;

    assert_eq!(total, 5);
    assert_eq!(first.len(), 2);
    assert_eq!(last.len(), 1);

    Ok(())
}
