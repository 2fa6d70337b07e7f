//! Message factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a message with the given content into a room.
pub async fn create_message(
    db: &DatabaseConnection,
    room_id: i32,
    user_id: i32,
    content: &str,
) -> Result<entity::message::Model, DbErr> {
    let now = Utc::now();
    entity::message::ActiveModel {
        room_id: ActiveValue::Set(room_id),
        user_id: ActiveValue::Set(user_id),
        content: ActiveValue::Set(content.to_string()),
        attachment_url: ActiveValue::Set(None),
        client_token: ActiveValue::Set(None),
        edited: ActiveValue::Set(false),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
