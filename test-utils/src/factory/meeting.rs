//! Meeting factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct MeetingFactory<'a> {
    db: &'a DatabaseConnection,
    organizer_id: i32,
    title: String,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    participant_ids: Vec<i32>,
}

impl<'a> MeetingFactory<'a> {
    /// Defaults to a one hour meeting starting in one hour with no participants.
    pub fn new(db: &'a DatabaseConnection, organizer_id: i32) -> Self {
        let start_at = Utc::now() + Duration::hours(1);
        Self {
            db,
            organizer_id,
            title: format!("Meeting {}", next_id()),
            start_at,
            end_at: start_at + Duration::hours(1),
            participant_ids: Vec::new(),
        }
    }

    pub fn starts_at(mut self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        self.start_at = start_at;
        self.end_at = end_at;
        self
    }

    pub fn participant(mut self, user_id: i32) -> Self {
        self.participant_ids.push(user_id);
        self
    }

    pub async fn build(self) -> Result<entity::meeting::Model, DbErr> {
        let meeting = entity::meeting::ActiveModel {
            organizer_id: ActiveValue::Set(self.organizer_id),
            organization_id: ActiveValue::Set(None),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            location: ActiveValue::Set(None),
            start_at: ActiveValue::Set(self.start_at),
            end_at: ActiveValue::Set(self.end_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for user_id in self.participant_ids {
            entity::meeting_participant::ActiveModel {
                meeting_id: ActiveValue::Set(meeting.id),
                user_id: ActiveValue::Set(user_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(meeting)
    }
}
