//! Chat room factory helpers.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

async fn insert_room(
    db: &DatabaseConnection,
    kind: &str,
    name: Option<String>,
    created_by: i32,
    member_ids: &[i32],
) -> Result<entity::chat_room::Model, DbErr> {
    let room = entity::chat_room::ActiveModel {
        kind: ActiveValue::Set(kind.to_string()),
        name: ActiveValue::Set(name),
        organization_id: ActiveValue::Set(None),
        created_by: ActiveValue::Set(created_by),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for user_id in member_ids {
        add_room_member(db, room.id, *user_id).await?;
    }

    Ok(room)
}

/// Creates a direct-message room between two users.
pub async fn create_direct_room(
    db: &DatabaseConnection,
    user_a: i32,
    user_b: i32,
) -> Result<entity::chat_room::Model, DbErr> {
    insert_room(db, "direct", None, user_a, &[user_a, user_b]).await
}

/// Creates a group room created by the first member in `member_ids`.
pub async fn create_group_room(
    db: &DatabaseConnection,
    name: &str,
    member_ids: &[i32],
) -> Result<entity::chat_room::Model, DbErr> {
    let created_by = member_ids
        .first()
        .copied()
        .ok_or_else(|| DbErr::Custom("group room needs at least one member".to_string()))?;

    insert_room(db, "group", Some(name.to_string()), created_by, member_ids).await
}

pub async fn add_room_member(
    db: &DatabaseConnection,
    room_id: i32,
    user_id: i32,
) -> Result<entity::chat_room_member::Model, DbErr> {
    entity::chat_room_member::ActiveModel {
        room_id: ActiveValue::Set(room_id),
        user_id: ActiveValue::Set(user_id),
        last_read_message_id: ActiveValue::Set(None),
        joined_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
