//! Domain & parameter models for meetings.

use chrono::{DateTime, Utc};

use crate::model::meeting::{CreateMeetingDto, MeetingDto, UpdateMeetingDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    pub id: i32,
    pub organizer_id: i32,
    pub organization_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub participant_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl Meeting {
    pub fn from_entity(
        entity: entity::meeting::Model,
        participants: Vec<entity::meeting_participant::Model>,
    ) -> Self {
        let mut participant_ids: Vec<i32> = participants.into_iter().map(|p| p.user_id).collect();
        participant_ids.sort_unstable();

        Self {
            id: entity.id,
            organizer_id: entity.organizer_id,
            organization_id: entity.organization_id,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            start_at: entity.start_at,
            end_at: entity.end_at,
            participant_ids,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> MeetingDto {
        MeetingDto {
            id: self.id,
            organizer_id: self.organizer_id,
            organization_id: self.organization_id,
            title: self.title,
            description: self.description,
            location: self.location,
            start_at: self.start_at,
            end_at: self.end_at,
            participant_ids: self.participant_ids,
            created_at: self.created_at,
        }
    }

    pub fn is_attended_by(&self, user_id: i32) -> bool {
        self.organizer_id == user_id || self.participant_ids.contains(&user_id)
    }
}

/// Participants excluding the organizer, without duplicates.
fn participants(organizer_id: i32, ids: Vec<i32>) -> Vec<i32> {
    let mut participants: Vec<i32> = Vec::new();
    for id in ids {
        if id != organizer_id && !participants.contains(&id) {
            participants.push(id);
        }
    }
    participants
}

#[derive(Debug, Clone)]
pub struct CreateMeetingParams {
    pub organizer_id: i32,
    pub organization_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub participant_ids: Vec<i32>,
}

impl CreateMeetingParams {
    pub fn from_dto(organizer_id: i32, dto: CreateMeetingDto) -> Self {
        Self {
            organizer_id,
            organization_id: dto.organization_id,
            title: dto.title.trim().to_string(),
            description: dto.description,
            location: dto.location,
            start_at: dto.start_at,
            end_at: dto.end_at,
            participant_ids: participants(organizer_id, dto.participant_ids),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateMeetingParams {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub participant_ids: Option<Vec<i32>>,
}

impl UpdateMeetingParams {
    pub fn from_dto(id: i32, organizer_id: i32, dto: UpdateMeetingDto) -> Self {
        Self {
            id,
            title: dto.title.map(|t| t.trim().to_string()),
            description: dto.description,
            location: dto.location,
            start_at: dto.start_at,
            end_at: dto.end_at,
            participant_ids: dto
                .participant_ids
                .map(|ids| participants(organizer_id, ids)),
        }
    }
}

/// Optional time window for listing meetings; defaults to upcoming meetings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeetingRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
