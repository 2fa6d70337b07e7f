use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000001_create_user_table::User,
    m20260101_000002_create_organization_table::Organization,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChatRoom::Table)
                    .if_not_exists()
                    .col(pk_auto(ChatRoom::Id))
                    .col(string(ChatRoom::Kind))
                    .col(string_null(ChatRoom::Name))
                    .col(integer_null(ChatRoom::OrganizationId))
                    .col(integer(ChatRoom::CreatedBy))
                    .col(
                        timestamp(ChatRoom::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_room_created_by")
                            .from(ChatRoom::Table, ChatRoom::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_room_organization_id")
                            .from(ChatRoom::Table, ChatRoom::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatRoom::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChatRoom {
    Table,
    Id,
    Kind,
    Name,
    OrganizationId,
    CreatedBy,
    CreatedAt,
}
