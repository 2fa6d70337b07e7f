use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000001_create_user_table::User, m20260106_000012_create_meeting_table::Meeting,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MeetingParticipant::Table)
                    .if_not_exists()
                    .col(integer(MeetingParticipant::MeetingId))
                    .col(integer(MeetingParticipant::UserId))
                    .primary_key(
                        Index::create()
                            .col(MeetingParticipant::MeetingId)
                            .col(MeetingParticipant::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meeting_participant_meeting_id")
                            .from(MeetingParticipant::Table, MeetingParticipant::MeetingId)
                            .to(Meeting::Table, Meeting::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meeting_participant_user_id")
                            .from(MeetingParticipant::Table, MeetingParticipant::UserId)
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
            .drop_table(Table::drop().table(MeetingParticipant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MeetingParticipant {
    Table,
    MeetingId,
    UserId,
}
