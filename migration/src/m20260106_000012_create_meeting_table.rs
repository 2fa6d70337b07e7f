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
                    .table(Meeting::Table)
                    .if_not_exists()
                    .col(pk_auto(Meeting::Id))
                    .col(integer(Meeting::OrganizerId))
                    .col(integer_null(Meeting::OrganizationId))
                    .col(string(Meeting::Title))
                    .col(text_null(Meeting::Description))
                    .col(string_null(Meeting::Location))
                    .col(timestamp(Meeting::StartAt))
                    .col(timestamp(Meeting::EndAt))
                    .col(
                        timestamp(Meeting::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meeting_organizer_id")
                            .from(Meeting::Table, Meeting::OrganizerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meeting_organization_id")
                            .from(Meeting::Table, Meeting::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Meeting::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Meeting {
    Table,
    Id,
    OrganizerId,
    OrganizationId,
    Title,
    Description,
    Location,
    StartAt,
    EndAt,
    CreatedAt,
}
