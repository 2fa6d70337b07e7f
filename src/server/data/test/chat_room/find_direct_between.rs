use super::*;

/// Tests that the direct room is found regardless of argument order.
///
/// Expected: Some(room) both ways, None for an unrelated pair
#[tokio::test]
async fn finds_room_for_pair_in_either_order() -> Result<(), DbErr> {
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

    let repo = ChatRoomRepository::new(db);

    assert_eq!(
        repo.find_direct_between(alice.id, bob.id).await?.map(|r| r.id),
        Some(room.id)
    );
    assert_eq!(
        repo.find_direct_between(bob.id, alice.id).await?.map(|r| r.id),
        Some(room.id)
    );
    assert!(repo.find_direct_between(alice.id, carol.id).await?.is_none());

    Ok(())
}

/// Tests that a group room containing both users is not mistaken for a direct room.
///
/// Expected: None
#[tokio::test]
async fn ignores_group_rooms() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    factory::create_group_room(db, "Pair", &[alice.id, bob.id]).await?;

    let found = ChatRoomRepository::new(db)
        .find_direct_between(alice.id, bob.id)
        .await?;

    assert!(found.is_none());

    Ok(())
}
