use super::*;

/// Tests that unread counts skip the member's own messages and respect the marker.
///
/// Expected: 2 unread before reading, 1 after reading up to the first message
#[tokio::test]
async fn counts_messages_from_others_after_marker() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;

    let first = factory::create_message(db, room.id, alice.id, "one").await?;
    factory::create_message(db, room.id, bob.id, "mine").await?;
    factory::create_message(db, room.id, alice.id, "two").await?;

    let repo = ChatRoomRepository::new(db);

    assert_eq!(repo.count_unread(room.id, bob.id, None).await?, 2);
    assert_eq!(repo.count_unread(room.id, bob.id, Some(first.id)).await?, 1);

    Ok(())
}
