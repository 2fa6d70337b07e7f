//! Domain & parameter models for personal and organization tasks.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::task::{
        CreateTaskDto, PaginatedTasksDto, TaskDto, TaskPriority, TaskStatus, UpdateTaskDto,
    },
    server::{error::AppError, model::parse_stored},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i32,
    pub user_id: i32,
    pub organization_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a task from its row and tag rows, tags sorted by name.
    pub fn from_entity(
        entity: entity::task::Model,
        tags: Vec<entity::task_tag::Model>,
    ) -> Result<Self, AppError> {
        let mut tags: Vec<String> = tags.into_iter().map(|t| t.name).collect();
        tags.sort();

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            organization_id: entity.organization_id,
            title: entity.title,
            description: entity.description,
            status: parse_stored("task.status", entity.status, TaskStatus::parse)?,
            priority: parse_stored("task.priority", entity.priority, TaskPriority::parse)?,
            due_date: entity.due_date,
            tags,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> TaskDto {
        TaskDto {
            id: self.id,
            user_id: self.user_id,
            organization_id: self.organization_id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Trims tag names, drops empty ones and removes duplicates while keeping first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

#[derive(Debug, Clone)]
pub struct CreateTaskParams {
    pub user_id: i32,
    pub organization_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

impl CreateTaskParams {
    pub fn from_dto(user_id: i32, dto: CreateTaskDto) -> Self {
        Self {
            user_id,
            organization_id: dto.organization_id,
            title: dto.title.trim().to_string(),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            status: dto.status.unwrap_or_default(),
            priority: dto.priority.unwrap_or_default(),
            due_date: dto.due_date,
            tags: normalize_tags(dto.tags),
        }
    }
}

/// Partial task update. `description: Some(None)` clears the description and
/// `tags: Some(..)` replaces the full tag set.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskParams {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
}

impl UpdateTaskParams {
    pub fn from_dto(id: i32, dto: UpdateTaskDto) -> Self {
        Self {
            id,
            title: dto.title.map(|t| t.trim().to_string()),
            description: dto
                .description
                .map(|d| Some(d).filter(|d| !d.trim().is_empty())),
            status: dto.status,
            priority: dto.priority,
            due_date: dto.due_date,
            tags: dto.tags.map(normalize_tags),
        }
    }
}

/// Filters for listing the tasks visible to a user.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub organization_id: Option<i32>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedTasks {
    pub tasks: Vec<Task>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedTasks {
    pub fn into_dto(self) -> PaginatedTasksDto {
        PaginatedTasksDto {
            tasks: self.tasks.into_iter().map(|t| t.into_dto()).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
