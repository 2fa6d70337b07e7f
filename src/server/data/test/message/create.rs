use super::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

/// Tests storing a message and resolving its author.
///
/// Expected: Ok(Message) carrying the author's name, findable by client token
#[tokio::test]
async fn creates_message_with_author() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::user::UserFactory::new(db)
        .name("Alice")
        .build()
        .await?;
    let bob = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;

    let repo = MessageRepository::new(db);
    let message = repo
        .create(CreateMessageParams {
            room_id: room.id,
            user_id: alice.id,
            content: "Hello".to_string(),
            attachment_url: None,
            client_token: Some("tok-1".to_string()),
        })
        .await?;

    assert_eq!(message.author_name, "Alice");
    assert_eq!(message.content, "Hello");
    assert!(!message.edited);

    let by_token = repo
        .find_by_client_token(room.id, alice.id, "tok-1")
        .await?;
    assert_eq!(by_token.map(|m| m.id), Some(message.id));

    let other_user = repo.find_by_client_token(room.id, bob.id, "tok-1").await?;
    assert!(other_user.is_none());

    Ok(())
}

/// Expected: Ok(true) then the message is gone
#[tokio::test]
async fn deletes_message() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;
    let message = factory::create_message(db, room.id, alice.id, "bye").await?;

    let repo = MessageRepository::new(db);
    assert!(repo.delete(message.id).await?);
    assert!(repo.find_by_id(message.id).await?.is_none());

    Ok(())
}

/// Tests two sends carrying the same client token, as when an offline retry overlaps the
/// original request.
///
/// Expected: the plain insert is rejected by the unique index, `create_once` returns the
/// stored message, and only one row carries the token
#[tokio::test]
async fn client_token_is_stored_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_chat_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let room = factory::create_direct_room(db, alice.id, bob.id).await?;

    let params = |content: &str| CreateMessageParams {
        room_id: room.id,
        user_id: alice.id,
        content: content.to_string(),
        attachment_url: None,
        client_token: Some("tok".to_string()),
    };

    let repo = MessageRepository::new(db);
    let (first, created) = repo.create_once(params("first try")).await?;
    assert!(created);

    let err = repo.create(params("retry")).await.unwrap_err();
    assert!(crate::server::data::is_unique_violation(&err));

    let (second, created) = repo.create_once(params("retry")).await?;
    assert!(!created);
    assert_eq!(second.id, first.id);
    assert_eq!(second.content, "first try");

    let rows = entity::prelude::Message::find()
        .filter(entity::message::Column::ClientToken.eq("tok"))
        .count(db)
        .await?;
    assert_eq!(rows, 1);

    let (untokened, created) = repo
        .create_once(CreateMessageParams {
            client_token: None,
            ..params("no token")
        })
        .await?;
    assert!(created);
    assert_ne!(untokened.id, first.id);

    Ok(())
}
