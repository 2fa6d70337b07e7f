use super::*;

/// Expected: Ok(User) for a member of the room
#[tokio::test]
async fn grants_access_to_room_member() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;
    AuthSession::new(session).set_user_id(bob.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::ChatRoomMember(room.id)])
        .await?;

    assert_eq!(user.id, bob.id);

    Ok(())
}

/// Expected: AccessDenied for a non-member, NotFound for a missing room
#[tokio::test]
async fn denies_non_members_and_missing_rooms() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let carol = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;
    AuthSession::new(session).set_user_id(carol.id).await?;

    let guard = AuthGuard::new(db, session);

    let denied = guard.require(&[Permission::ChatRoomMember(room.id)]).await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let missing = guard
        .require(&[Permission::ChatRoomMember(room.id + 100)])
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}
