use super::*;

/// Tests newest-first paging with a `before` cursor.
///
/// Expected: [m4, m3] then [m2, m1]
#[tokio::test]
async fn pages_backwards_through_history() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;

    let mut ids = Vec::new();
    for content in ["m1", "m2", "m3", "m4"] {
        ids.push(factory::create_message(db, room.id, alice.id, content).await?.id);
    }

    let repo = MessageRepository::new(db);

    let first = repo
        .get_page(room.id, MessageCursor { before: None, limit: 2 })
        .await?;
    assert_eq!(
        first.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![ids[3], ids[2]]
    );

    let second = repo
        .get_page(
            room.id,
            MessageCursor {
                before: Some(ids[2]),
                limit: 2,
            },
        )
        .await?;
    assert_eq!(
        second.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![ids[1], ids[0]]
    );

    assert_eq!(repo.latest_id(room.id).await?, Some(ids[3]));

    Ok(())
}

/// Expected: messages of other rooms are excluded
#[tokio::test]
async fn only_returns_messages_of_room() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let carol = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;
    let other = factory::create_direct_room(db, alice.id, carol.id).await?;
    factory::create_message(db, room.id, alice.id, "here").await?;
    factory::create_message(db, other.id, alice.id, "elsewhere").await?;

    let page = MessageRepository::new(db)
        .get_page(room.id, MessageCursor { before: None, limit: 50 })
        .await?;

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].content, "here");

    Ok(())
}
