//! Task factory for creating test task entities.

use crate::factory::helpers::next_id;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct TaskFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    organization_id: Option<i32>,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    due_date: Option<NaiveDate>,
    tags: Vec<String>,
}

impl<'a> TaskFactory<'a> {
    /// Defaults: `"Task {id}"`, status `todo`, priority `medium`, no tags.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            organization_id: None,
            title: format!("Task {}", next_id()),
            description: None,
            status: "todo".to_string(),
            priority: "medium".to_string(),
            due_date: None,
            tags: Vec::new(),
        }
    }

    pub fn organization_id(mut self, organization_id: i32) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub async fn build(self) -> Result<entity::task::Model, DbErr> {
        let now = Utc::now();
        let task = entity::task::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            organization_id: ActiveValue::Set(self.organization_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            status: ActiveValue::Set(self.status),
            priority: ActiveValue::Set(self.priority),
            due_date: ActiveValue::Set(self.due_date),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for tag in self.tags {
            entity::task_tag::ActiveModel {
                task_id: ActiveValue::Set(task.id),
                name: ActiveValue::Set(tag),
            }
            .insert(self.db)
            .await?;
        }

        Ok(task)
    }
}

pub async fn create_task(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::task::Model, DbErr> {
    TaskFactory::new(db, user_id).build().await
}
