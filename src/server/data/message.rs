use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    data::is_unique_violation,
    model::chat::{CreateMessageParams, Message, MessageCursor},
};

pub struct MessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateMessageParams) -> Result<Message, DbErr> {
        let now = Utc::now();

        let message = entity::message::ActiveModel {
            room_id: ActiveValue::Set(params.room_id),
            user_id: ActiveValue::Set(params.user_id),
            content: ActiveValue::Set(params.content),
            attachment_url: ActiveValue::Set(params.attachment_url),
            client_token: ActiveValue::Set(params.client_token),
            edited: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.find_by_id(message.id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Message with id {} not found after creation",
                message.id
            )))
    }

    /// Inserts a message, falling back to the sender's earlier message with the same client
    /// token when the unique index rejects the insert.
    ///
    /// # Returns
    /// - `Ok((message, true))` - Newly stored message
    /// - `Ok((message, false))` - Message already stored under this client token
    pub async fn create_once(&self, params: CreateMessageParams) -> Result<(Message, bool), DbErr> {
        let key = params
            .client_token
            .clone()
            .map(|token| (params.room_id, params.user_id, token));

        match self.create(params).await {
            Ok(message) => Ok((message, true)),
            Err(err) if is_unique_violation(&err) => {
                let Some((room_id, user_id, token)) = key else {
                    return Err(err);
                };

                match self.find_by_client_token(room_id, user_id, &token).await? {
                    Some(existing) => Ok((existing, false)),
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Message>, DbErr> {
        let row = entity::prelude::Message::find_by_id(id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        Ok(row.and_then(|(message, author)| author.map(|a| Message::from_entity(message, a))))
    }

    /// Looks up a previous send carrying the same client token.
    pub async fn find_by_client_token(
        &self,
        room_id: i32,
        user_id: i32,
        client_token: &str,
    ) -> Result<Option<Message>, DbErr> {
        let row = entity::prelude::Message::find()
            .filter(entity::message::Column::RoomId.eq(room_id))
            .filter(entity::message::Column::UserId.eq(user_id))
            .filter(entity::message::Column::ClientToken.eq(client_token))
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        Ok(row.and_then(|(message, author)| author.map(|a| Message::from_entity(message, a))))
    }

    /// Newest-first page of a room's messages older than the cursor.
    pub async fn get_page(
        &self,
        room_id: i32,
        cursor: MessageCursor,
    ) -> Result<Vec<Message>, DbErr> {
        let mut query = entity::prelude::Message::find()
            .filter(entity::message::Column::RoomId.eq(room_id));

        if let Some(before) = cursor.before {
            query = query.filter(entity::message::Column::Id.lt(before));
        }

        let rows = query
            .find_also_related(entity::prelude::User)
            .order_by_desc(entity::message::Column::Id)
            .limit(cursor.limit)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(message, author)| author.map(|a| Message::from_entity(message, a)))
            .collect())
    }

    /// Id of the most recent message in the room.
    pub async fn latest_id(&self, room_id: i32) -> Result<Option<i32>, DbErr> {
        let message = entity::prelude::Message::find()
            .filter(entity::message::Column::RoomId.eq(room_id))
            .order_by_desc(entity::message::Column::Id)
            .one(self.db)
            .await?;

        Ok(message.map(|m| m.id))
    }

    /// Replaces the content and marks the message as edited.
    pub async fn update_content(&self, id: i32, content: String) -> Result<Option<Message>, DbErr> {
        let Some(message) = entity::prelude::Message::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = message.into_active_model();
        active.content = ActiveValue::Set(content);
        active.edited = ActiveValue::Set(true);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Message::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
