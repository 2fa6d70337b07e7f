use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::meeting::MeetingRepository,
    error::{auth::AuthError, AppError},
    model::meeting::{CreateMeetingParams, Meeting, MeetingRange, UpdateMeetingParams},
    service::{organization::OrganizationService, user::UserService},
};

pub struct MeetingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MeetingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Schedules a meeting organized by `params.organizer_id`.
    ///
    /// # Returns
    /// - `Err(AppError::Validation)` - Empty title or end not after start
    /// - `Err(AppError::NotFound)` - A participant does not exist
    pub async fn create(&self, params: CreateMeetingParams) -> Result<Meeting, AppError> {
        if params.title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        ensure_ends_after_start(params.start_at, params.end_at)?;

        UserService::new(self.db)
            .ensure_exist(&params.participant_ids)
            .await?;

        if let Some(organization_id) = params.organization_id {
            OrganizationService::new(self.db)
                .ensure_member(organization_id, params.organizer_id)
                .await?;
        }

        Ok(MeetingRepository::new(self.db).create(params).await?)
    }

    /// Gets a meeting the user organizes or attends. Others answer 404.
    pub async fn get(&self, id: i32, user_id: i32) -> Result<Meeting, AppError> {
        let meeting = MeetingRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|m| m.is_attended_by(user_id))
            .ok_or_else(|| AppError::not_found("Meeting"))?;

        Ok(meeting)
    }

    /// Meetings of the user starting within the range; upcoming ones by default.
    pub async fn get_for_user(
        &self,
        user_id: i32,
        range: MeetingRange,
        now: DateTime<Utc>,
    ) -> Result<Vec<Meeting>, AppError> {
        let from = range.from.unwrap_or(now);
        if range.to.is_some_and(|to| to < from) {
            return Err(AppError::validation("'from' must not be after 'to'"));
        }

        Ok(MeetingRepository::new(self.db)
            .get_for_user(user_id, from, range.to)
            .await?)
    }

    /// Updates a meeting. Only the organizer may change it.
    pub async fn update(&self, params: UpdateMeetingParams, user_id: i32) -> Result<Meeting, AppError> {
        let meeting = self.get(params.id, user_id).await?;
        ensure_organizer(&meeting, user_id)?;

        if params.title.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::validation("Title is required"));
        }
        ensure_ends_after_start(
            params.start_at.unwrap_or(meeting.start_at),
            params.end_at.unwrap_or(meeting.end_at),
        )?;

        if let Some(participant_ids) = &params.participant_ids {
            UserService::new(self.db).ensure_exist(participant_ids).await?;
        }

        MeetingRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| AppError::not_found("Meeting"))
    }

    /// Cancels a meeting. Only the organizer may delete it.
    pub async fn delete(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        let meeting = self.get(id, user_id).await?;
        ensure_organizer(&meeting, user_id)?;

        MeetingRepository::new(self.db).delete(id).await?;

        Ok(())
    }
}

fn ensure_ends_after_start(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Result<(), AppError> {
    if end_at <= start_at {
        return Err(AppError::validation("Meeting must end after it starts"));
    }
    Ok(())
}

fn ensure_organizer(meeting: &Meeting, user_id: i32) -> Result<(), AppError> {
    if meeting.organizer_id != user_id {
        return Err(AuthError::AccessDenied(
            user_id,
            format!("only the organizer can change meeting {}", meeting.id),
        )
        .into());
    }
    Ok(())
}
