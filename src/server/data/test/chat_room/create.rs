use super::*;

/// Tests creating a group room with its members.
///
/// Expected: room row and one membership per member id
#[tokio::test]
async fn creates_room_with_members() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let repo = ChatRoomRepository::new(db);

    let room = repo
        .create(CreateChatRoomParams {
            kind: RoomKind::Group,
            name: Some("Launch".to_string()),
            organization_id: None,
            created_by: alice.id,
            member_ids: vec![alice.id, bob.id],
        })
        .await?;

    assert_eq!(room.kind, "group");
    assert_eq!(room.name.as_deref(), Some("Launch"));
    assert!(repo.is_member(room.id, alice.id).await?);
    assert!(repo.is_member(room.id, bob.id).await?);
    assert_eq!(repo.get_members(room.id).await?.len(), 2);

    let rooms_of_bob = repo.get_for_user(bob.id).await?;
    assert_eq!(rooms_of_bob.len(), 1);
    assert_eq!(rooms_of_bob[0].id, room.id);

    Ok(())
}
