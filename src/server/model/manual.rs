//! Domain & parameter models for manuals and their access rules.

use chrono::{DateTime, Utc};

use crate::{
    model::manual::{
        AccessLevel, CreateManualDto, EditPermission, ManualDto, PaginatedManualsDto,
        UpdateManualDto,
    },
    server::{
        error::AppError,
        model::{parse_stored, user::User},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Manual {
    pub id: i32,
    pub user_id: i32,
    pub organization_id: Option<i32>,
    pub title: String,
    pub content: String,
    pub department: Option<String>,
    pub category: Option<String>,
    pub access_level: AccessLevel,
    pub edit_permission: EditPermission,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Manual {
    pub fn from_entity(entity: entity::manual::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            organization_id: entity.organization_id,
            title: entity.title,
            content: entity.content,
            department: entity.department,
            category: entity.category,
            access_level: parse_stored("manual.access_level", entity.access_level, AccessLevel::parse)?,
            edit_permission: parse_stored(
                "manual.edit_permission",
                entity.edit_permission,
                EditPermission::parse,
            )?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Admins and the author see everything. Others see public manuals and department
    /// manuals of their own department.
    pub fn is_visible_to(&self, user: &User) -> bool {
        if user.admin || self.user_id == user.id {
            return true;
        }

        match self.access_level {
            AccessLevel::Public => true,
            AccessLevel::Department => user.shares_department(self.department.as_deref()),
            AccessLevel::Private => false,
        }
    }

    /// Editing requires visibility first, then the manual's edit permission.
    pub fn is_editable_by(&self, user: &User) -> bool {
        if self.user_id == user.id {
            return true;
        }
        if !self.is_visible_to(user) {
            return false;
        }

        match self.edit_permission {
            EditPermission::Author => false,
            EditPermission::Department => user.shares_department(self.department.as_deref()),
            EditPermission::Everyone => true,
        }
    }

    /// Only the author or an admin may delete.
    pub fn is_deletable_by(&self, user: &User) -> bool {
        self.user_id == user.id || user.admin
    }

    /// Visibility, edit permission and department stay with the author or an admin.
    pub fn access_is_managed_by(&self, user: &User) -> bool {
        self.user_id == user.id || user.admin
    }

    pub fn into_dto(self, viewer: &User) -> ManualDto {
        let can_edit = self.is_editable_by(viewer);
        ManualDto {
            id: self.id,
            user_id: self.user_id,
            organization_id: self.organization_id,
            title: self.title,
            content: self.content,
            department: self.department,
            category: self.category,
            access_level: self.access_level,
            edit_permission: self.edit_permission,
            can_edit,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct CreateManualParams {
    pub user_id: i32,
    pub organization_id: Option<i32>,
    pub title: String,
    pub content: String,
    pub department: Option<String>,
    pub category: Option<String>,
    pub access_level: AccessLevel,
    pub edit_permission: EditPermission,
}

impl CreateManualParams {
    /// Department defaults to the author's own department.
    pub fn from_dto(author: &User, dto: CreateManualDto) -> Self {
        Self {
            user_id: author.id,
            organization_id: dto.organization_id,
            title: dto.title.trim().to_string(),
            content: dto.content,
            department: non_empty(dto.department).or_else(|| author.department.clone()),
            category: non_empty(dto.category),
            access_level: dto.access_level.unwrap_or_default(),
            edit_permission: dto.edit_permission.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateManualParams {
    pub id: i32,
    pub title: Option<String>,
    pub content: Option<String>,
    pub department: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub access_level: Option<AccessLevel>,
    pub edit_permission: Option<EditPermission>,
}

impl UpdateManualParams {
    pub fn from_dto(id: i32, dto: UpdateManualDto) -> Self {
        Self {
            id,
            title: dto.title.map(|t| t.trim().to_string()),
            content: dto.content,
            department: dto.department.map(|d| non_empty(Some(d))),
            category: dto.category.map(|c| non_empty(Some(c))),
            access_level: dto.access_level,
            edit_permission: dto.edit_permission,
        }
    }

    /// Whether applying the update would change who can see or edit `manual`.
    pub fn changes_access_of(&self, manual: &Manual) -> bool {
        self.access_level.is_some_and(|a| a != manual.access_level)
            || self
                .edit_permission
                .is_some_and(|e| e != manual.edit_permission)
            || self
                .department
                .as_ref()
                .is_some_and(|d| *d != manual.department)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ManualFilter {
    pub department: Option<String>,
    pub category: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedManuals {
    pub manuals: Vec<Manual>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedManuals {
    pub fn into_dto(self, viewer: &User) -> PaginatedManualsDto {
        PaginatedManualsDto {
            manuals: self.manuals.into_iter().map(|m| m.into_dto(viewer)).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
