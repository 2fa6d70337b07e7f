//! Manual factory for creating knowledge base documents.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ManualFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    title: String,
    content: String,
    department: Option<String>,
    category: Option<String>,
    access_level: String,
    edit_permission: String,
}

impl<'a> ManualFactory<'a> {
    /// Defaults: public, editable by the author only, no department or category.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            title: format!("Manual {}", next_id()),
            content: "Content".to_string(),
            department: None,
            category: None,
            access_level: "public".to_string(),
            edit_permission: "author".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn access_level(mut self, access_level: impl Into<String>) -> Self {
        self.access_level = access_level.into();
        self
    }

    pub fn edit_permission(mut self, edit_permission: impl Into<String>) -> Self {
        self.edit_permission = edit_permission.into();
        self
    }

    pub async fn build(self) -> Result<entity::manual::Model, DbErr> {
        let now = Utc::now();
        entity::manual::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            organization_id: ActiveValue::Set(None),
            title: ActiveValue::Set(self.title),
            content: ActiveValue::Set(self.content),
            department: ActiveValue::Set(self.department),
            category: ActiveValue::Set(self.category),
            access_level: ActiveValue::Set(self.access_level),
            edit_permission: ActiveValue::Set(self.edit_permission),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
