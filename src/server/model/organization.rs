//! Domain & parameter models for organizations and their members.

use chrono::{DateTime, Utc};

use crate::{
    model::organization::{
        CreateOrganizationDto, MemberRole, OrganizationDto, OrganizationMemberDto,
        UpdateOrganizationDto,
    },
    server::{error::AppError, model::parse_stored},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn from_entity(entity: entity::organization::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
        }
    }
}

/// An organization as seen by one of its members.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberOrganization {
    pub organization: Organization,
    pub role: MemberRole,
    pub member_count: u64,
}

impl MemberOrganization {
    pub fn into_dto(self) -> OrganizationDto {
        OrganizationDto {
            id: self.organization.id,
            name: self.organization.name,
            description: self.organization.description,
            owner_id: self.organization.owner_id,
            role: self.role,
            member_count: self.member_count,
            created_at: self.organization.created_at,
        }
    }
}

/// A member row joined with the user's name and email.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationMember {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl OrganizationMember {
    pub fn from_entity(
        member: entity::organization_member::Model,
        user: entity::user::Model,
    ) -> Result<Self, AppError> {
        Ok(Self {
            user_id: member.user_id,
            name: user.name,
            email: user.email,
            role: parse_stored("organization_member.role", member.role, MemberRole::parse)?,
            joined_at: member.joined_at,
        })
    }

    pub fn into_dto(self) -> OrganizationMemberDto {
        OrganizationMemberDto {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            role: self.role,
            joined_at: self.joined_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOrganizationParams {
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl CreateOrganizationParams {
    pub fn from_dto(owner_id: i32, dto: CreateOrganizationDto) -> Self {
        Self {
            owner_id,
            name: dto.name.trim().to_string(),
            description: dto.description.filter(|d| !d.trim().is_empty()),
        }
    }
}

/// Fields left as `None` are unchanged. `description: Some(None)` clears it.
#[derive(Debug, Clone)]
pub struct UpdateOrganizationParams {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl UpdateOrganizationParams {
    pub fn from_dto(id: i32, dto: UpdateOrganizationDto) -> Self {
        Self {
            id,
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto
                .description
                .map(|d| Some(d).filter(|d| !d.trim().is_empty())),
        }
    }
}
