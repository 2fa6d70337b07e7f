use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{model::chat::RoomKind, server::model::chat::CreateChatRoomParams};

pub struct ChatRoomRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChatRoomRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a room with every listed member.
    pub async fn create(
        &self,
        params: CreateChatRoomParams,
    ) -> Result<entity::chat_room::Model, DbErr> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let room = entity::chat_room::ActiveModel {
            kind: ActiveValue::Set(params.kind.as_str().to_string()),
            name: ActiveValue::Set(params.name),
            organization_id: ActiveValue::Set(params.organization_id),
            created_by: ActiveValue::Set(params.created_by),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for user_id in params.member_ids {
            entity::chat_room_member::ActiveModel {
                room_id: ActiveValue::Set(room.id),
                user_id: ActiveValue::Set(user_id),
                last_read_message_id: ActiveValue::Set(None),
                joined_at: ActiveValue::Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(room)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::chat_room::Model>, DbErr> {
        entity::prelude::ChatRoom::find_by_id(id).one(self.db).await
    }

    /// Finds the direct room shared by two users, if any.
    pub async fn find_direct_between(
        &self,
        user_a: i32,
        user_b: i32,
    ) -> Result<Option<entity::chat_room::Model>, DbErr> {
        let rooms_of_a: Vec<i32> = entity::prelude::ChatRoomMember::find()
            .filter(entity::chat_room_member::Column::UserId.eq(user_a))
            .all(self.db)
            .await?
            .into_iter()
            .map(|m| m.room_id)
            .collect();

        if rooms_of_a.is_empty() {
            return Ok(None);
        }

        let shared: Vec<i32> = entity::prelude::ChatRoomMember::find()
            .filter(entity::chat_room_member::Column::UserId.eq(user_b))
            .filter(entity::chat_room_member::Column::RoomId.is_in(rooms_of_a))
            .all(self.db)
            .await?
            .into_iter()
            .map(|m| m.room_id)
            .collect();

        if shared.is_empty() {
            return Ok(None);
        }

        entity::prelude::ChatRoom::find()
            .filter(entity::chat_room::Column::Id.is_in(shared))
            .filter(entity::chat_room::Column::Kind.eq(RoomKind::Direct.as_str()))
            .order_by_asc(entity::chat_room::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn find_member(
        &self,
        room_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::chat_room_member::Model>, DbErr> {
        entity::prelude::ChatRoomMember::find_by_id((room_id, user_id))
            .one(self.db)
            .await
    }

    pub async fn is_member(&self, room_id: i32, user_id: i32) -> Result<bool, DbErr> {
        Ok(self.find_member(room_id, user_id).await?.is_some())
    }

    /// Rooms the user belongs to, most recently created first.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<entity::chat_room::Model>, DbErr> {
        let room_ids: Vec<i32> = entity::prelude::ChatRoomMember::find()
            .filter(entity::chat_room_member::Column::UserId.eq(user_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|m| m.room_id)
            .collect();

        if room_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::ChatRoom::find()
            .filter(entity::chat_room::Column::Id.is_in(room_ids))
            .order_by_desc(entity::chat_room::Column::CreatedAt)
            .order_by_desc(entity::chat_room::Column::Id)
            .all(self.db)
            .await
    }

    /// Member rows joined with their users, ordered by join time.
    pub async fn get_members(
        &self,
        room_id: i32,
    ) -> Result<Vec<(entity::chat_room_member::Model, entity::user::Model)>, DbErr> {
        let rows = entity::prelude::ChatRoomMember::find()
            .filter(entity::chat_room_member::Column::RoomId.eq(room_id))
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::chat_room_member::Column::JoinedAt)
            .order_by_asc(entity::chat_room_member::Column::UserId)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(member, user)| user.map(|u| (member, u)))
            .collect())
    }

    pub async fn add_member(
        &self,
        room_id: i32,
        user_id: i32,
    ) -> Result<entity::chat_room_member::Model, DbErr> {
        entity::chat_room_member::ActiveModel {
            room_id: ActiveValue::Set(room_id),
            user_id: ActiveValue::Set(user_id),
            last_read_message_id: ActiveValue::Set(None),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Messages by other members newer than `last_read_message_id`.
    pub async fn count_unread(
        &self,
        room_id: i32,
        user_id: i32,
        last_read_message_id: Option<i32>,
    ) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Message::find()
            .filter(entity::message::Column::RoomId.eq(room_id))
            .filter(entity::message::Column::UserId.ne(user_id));

        if let Some(last_read) = last_read_message_id {
            query = query.filter(entity::message::Column::Id.gt(last_read));
        }

        query.count(self.db).await
    }

    /// Moves the member's read marker forward to `message_id`, never backwards.
    pub async fn mark_read(&self, room_id: i32, user_id: i32, message_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ChatRoomMember::update_many()
            .col_expr(
                entity::chat_room_member::Column::LastReadMessageId,
                Expr::value(message_id),
            )
            .filter(entity::chat_room_member::Column::RoomId.eq(room_id))
            .filter(entity::chat_room_member::Column::UserId.eq(user_id))
            .filter(
                Condition::any()
                    .add(entity::chat_room_member::Column::LastReadMessageId.is_null())
                    .add(entity::chat_room_member::Column::LastReadMessageId.lt(message_id)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
