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
                    .table(Manual::Table)
                    .if_not_exists()
                    .col(pk_auto(Manual::Id))
                    .col(integer(Manual::UserId))
                    .col(integer_null(Manual::OrganizationId))
                    .col(string(Manual::Title))
                    .col(text(Manual::Content))
                    .col(string_null(Manual::Department))
                    .col(string_null(Manual::Category))
                    .col(string(Manual::AccessLevel).default("public"))
                    .col(string(Manual::EditPermission).default("author"))
                    .col(
                        timestamp(Manual::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Manual::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_manual_user_id")
                            .from(Manual::Table, Manual::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_manual_organization_id")
                            .from(Manual::Table, Manual::OrganizationId)
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
            .drop_table(Table::drop().table(Manual::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Manual {
    Table,
    Id,
    UserId,
    OrganizationId,
    Title,
    Content,
    Department,
    Category,
    AccessLevel,
    EditPermission,
    CreatedAt,
    UpdatedAt,
}
