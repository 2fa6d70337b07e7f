use super::*;

/// Expected: new content with `edited` set
#[tokio::test]
async fn replaces_content_and_marks_edited() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;
    let message = factory::create_message(db, room.id, alice.id, "typo").await?;

    let updated = MessageRepository::new(db)
        .update_content(message.id, "fixed".to_string())
        .await?
        .expect("message exists");

    assert_eq!(updated.content, "fixed");
    assert!(updated.edited);

    Ok(())
}

/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_message() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = MessageRepository::new(db)
        .update_content(404, "anything".to_string())
        .await?;

    assert!(result.is_none());

    Ok(())
}
