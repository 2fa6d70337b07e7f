use super::*;

/// Tests that the read marker only moves forward.
///
/// Expected: marker set, later stale receipt ignored
#[tokio::test]
async fn never_moves_marker_backwards() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;
    let older = factory::create_message(db, room.id, alice.id, "older").await?;
    let newer = factory::create_message(db, room.id, alice.id, "newer").await?;

    let repo = ChatRoomRepository::new(db);

    assert!(repo.mark_read(room.id, bob.id, newer.id).await?);
    assert!(!repo.mark_read(room.id, bob.id, older.id).await?);

    let member = repo.find_member(room.id, bob.id).await?.expect("member");
    assert_eq!(member.last_read_message_id, Some(newer.id));

    Ok(())
}

/// Expected: Ok(false) for a user outside the room
#[tokio::test]
async fn ignores_non_members() -> Result<(), DbErr> {
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
    let message = factory::create_message(db, room.id, alice.id, "hi").await?;

    assert!(
        !ChatRoomRepository::new(db)
            .mark_read(room.id, carol.id, message.id)
            .await?
    );

    Ok(())
}
