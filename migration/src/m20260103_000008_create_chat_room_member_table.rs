use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000001_create_user_table::User,
    m20260103_000007_create_chat_room_table::ChatRoom,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChatRoomMember::Table)
                    .if_not_exists()
                    .col(integer(ChatRoomMember::RoomId))
                    .col(integer(ChatRoomMember::UserId))
                    .col(integer_null(ChatRoomMember::LastReadMessageId))
                    .col(
                        timestamp(ChatRoomMember::JoinedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ChatRoomMember::RoomId)
                            .col(ChatRoomMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_room_member_room_id")
                            .from(ChatRoomMember::Table, ChatRoomMember::RoomId)
                            .to(ChatRoom::Table, ChatRoom::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_room_member_user_id")
                            .from(ChatRoomMember::Table, ChatRoomMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatRoomMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChatRoomMember {
    Table,
    RoomId,
    UserId,
    LastReadMessageId,
    JoinedAt,
}
