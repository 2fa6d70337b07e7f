use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::model::meeting::{CreateMeetingParams, Meeting, UpdateMeetingParams};

pub struct MeetingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MeetingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateMeetingParams) -> Result<Meeting, DbErr> {
        let txn = self.db.begin().await?;

        let meeting = entity::meeting::ActiveModel {
            organizer_id: ActiveValue::Set(params.organizer_id),
            organization_id: ActiveValue::Set(params.organization_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            location: ActiveValue::Set(params.location),
            start_at: ActiveValue::Set(params.start_at),
            end_at: ActiveValue::Set(params.end_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut participants = Vec::with_capacity(params.participant_ids.len());
        for user_id in params.participant_ids {
            participants.push(
                entity::meeting_participant::ActiveModel {
                    meeting_id: ActiveValue::Set(meeting.id),
                    user_id: ActiveValue::Set(user_id),
                }
                .insert(&txn)
                .await?,
            );
        }

        txn.commit().await?;

        Ok(Meeting::from_entity(meeting, participants))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Meeting>, DbErr> {
        let Some(meeting) = entity::prelude::Meeting::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let participants = entity::prelude::MeetingParticipant::find()
            .filter(entity::meeting_participant::Column::MeetingId.eq(id))
            .all(self.db)
            .await?;

        Ok(Some(Meeting::from_entity(meeting, participants)))
    }

    /// Meetings the user organizes or attends starting within `[from, to]`, soonest first.
    pub async fn get_for_user(
        &self,
        user_id: i32,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Meeting>, DbErr> {
        let attending: Vec<i32> = entity::prelude::MeetingParticipant::find()
            .filter(entity::meeting_participant::Column::UserId.eq(user_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|p| p.meeting_id)
            .collect();

        let mut involvement =
            Condition::any().add(entity::meeting::Column::OrganizerId.eq(user_id));
        if !attending.is_empty() {
            involvement = involvement.add(entity::meeting::Column::Id.is_in(attending));
        }

        let mut query = entity::prelude::Meeting::find()
            .filter(involvement)
            .filter(entity::meeting::Column::StartAt.gte(from));
        if let Some(to) = to {
            query = query.filter(entity::meeting::Column::StartAt.lte(to));
        }

        let meetings = query
            .order_by_asc(entity::meeting::Column::StartAt)
            .order_by_asc(entity::meeting::Column::Id)
            .all(self.db)
            .await?;

        let ids: Vec<i32> = meetings.iter().map(|m| m.id).collect();
        let mut participants_by_meeting: HashMap<i32, Vec<entity::meeting_participant::Model>> =
            HashMap::new();
        if !ids.is_empty() {
            for participant in entity::prelude::MeetingParticipant::find()
                .filter(entity::meeting_participant::Column::MeetingId.is_in(ids))
                .all(self.db)
                .await?
            {
                participants_by_meeting
                    .entry(participant.meeting_id)
                    .or_default()
                    .push(participant);
            }
        }

        Ok(meetings
            .into_iter()
            .map(|meeting| {
                let participants = participants_by_meeting
                    .remove(&meeting.id)
                    .unwrap_or_default();
                Meeting::from_entity(meeting, participants)
            })
            .collect())
    }

    /// Applies a partial update; a provided participant list replaces the existing one.
    pub async fn update(&self, params: UpdateMeetingParams) -> Result<Option<Meeting>, DbErr> {
        let Some(meeting) = entity::prelude::Meeting::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let txn = self.db.begin().await?;

        let mut active = meeting.into_active_model();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(location) = params.location {
            active.location = ActiveValue::Set(Some(location));
        }
        if let Some(start_at) = params.start_at {
            active.start_at = ActiveValue::Set(start_at);
        }
        if let Some(end_at) = params.end_at {
            active.end_at = ActiveValue::Set(end_at);
        }
        if active.is_changed() {
            active.update(&txn).await?;
        }

        if let Some(participant_ids) = params.participant_ids {
            entity::prelude::MeetingParticipant::delete_many()
                .filter(entity::meeting_participant::Column::MeetingId.eq(params.id))
                .exec(&txn)
                .await?;

            for user_id in participant_ids {
                entity::meeting_participant::ActiveModel {
                    meeting_id: ActiveValue::Set(params.id),
                    user_id: ActiveValue::Set(user_id),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        self.find_by_id(params.id).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Meeting::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
