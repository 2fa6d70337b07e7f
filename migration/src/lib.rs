pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_user_table;
mod m20260101_000002_create_organization_table;
mod m20260101_000003_create_organization_member_table;
mod m20260101_000004_create_invitation_table;
mod m20260102_000005_create_task_table;
mod m20260102_000006_create_task_tag_table;
mod m20260103_000007_create_chat_room_table;
mod m20260103_000008_create_chat_room_member_table;
mod m20260103_000009_create_message_table;
mod m20260104_000010_create_manual_table;
mod m20260105_000011_create_attendance_table;
mod m20260106_000012_create_meeting_table;
mod m20260106_000013_create_meeting_participant_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_user_table::Migration),
            Box::new(m20260101_000002_create_organization_table::Migration),
            Box::new(m20260101_000003_create_organization_member_table::Migration),
            Box::new(m20260101_000004_create_invitation_table::Migration),
            Box::new(m20260102_000005_create_task_table::Migration),
            Box::new(m20260102_000006_create_task_tag_table::Migration),
            Box::new(m20260103_000007_create_chat_room_table::Migration),
            Box::new(m20260103_000008_create_chat_room_member_table::Migration),
            Box::new(m20260103_000009_create_message_table::Migration),
            Box::new(m20260104_000010_create_manual_table::Migration),
            Box::new(m20260105_000011_create_attendance_table::Migration),
            Box::new(m20260106_000012_create_meeting_table::Migration),
            Box::new(m20260106_000013_create_meeting_participant_table::Migration),
        ]
    }
}
