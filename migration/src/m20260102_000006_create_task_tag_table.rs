use sea_orm_migration::{prelude::*, schema::*};

use super::m20260102_000005_create_task_table::Task;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TaskTag::Table)
                    .if_not_exists()
                    .col(integer(TaskTag::TaskId))
                    .col(string(TaskTag::Name))
                    .primary_key(Index::create().col(TaskTag::TaskId).col(TaskTag::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_tag_task_id")
                            .from(TaskTag::Table, TaskTag::TaskId)
                            .to(Task::Table, Task::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaskTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TaskTag {
    Table,
    TaskId,
    Name,
}
