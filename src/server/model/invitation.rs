//! Domain & parameter models for organization invitation codes.

use chrono::{DateTime, Utc};

use crate::model::invitation::InvitationDto;

/// A join code for an organization, optionally limited in time and uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Invitation {
    pub id: i32,
    pub organization_id: i32,
    pub code: String,
    pub created_by: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub use_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub fn from_entity(entity: entity::invitation::Model) -> Self {
        Self {
            id: entity.id,
            organization_id: entity.organization_id,
            code: entity.code,
            created_by: entity.created_by,
            expires_at: entity.expires_at,
            max_uses: entity.max_uses,
            use_count: entity.use_count,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> InvitationDto {
        InvitationDto {
            id: self.id,
            organization_id: self.organization_id,
            code: self.code,
            created_by: self.created_by,
            expires_at: self.expires_at,
            max_uses: self.max_uses,
            use_count: self.use_count,
            created_at: self.created_at,
        }
    }

    /// An invitation is expired from its expiry instant onwards.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// Whether the code has been used as many times as it allows.
    pub fn is_exhausted(&self) -> bool {
        self.max_uses.is_some_and(|max| self.use_count >= max)
    }
}

/// Outcome of redeeming an invitation for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redemption {
    /// Use counted and membership created.
    Joined,
    /// No uses left; nothing changed.
    Exhausted,
    /// The user was already a member; the use was not counted.
    AlreadyMember,
}

#[derive(Debug, Clone)]
pub struct CreateInvitationParams {
    pub organization_id: i32,
    pub created_by: i32,
    pub code: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
}
