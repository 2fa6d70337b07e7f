use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::model::task::{CreateTaskParams, TaskFilter, UpdateTaskParams};

/// A task row with its tag rows.
pub type TaskWithTags = (entity::task::Model, Vec<entity::task_tag::Model>);

pub struct TaskRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaskRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the task and its tags in one transaction.
    pub async fn create(&self, params: CreateTaskParams) -> Result<TaskWithTags, DbErr> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let task = entity::task::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            organization_id: ActiveValue::Set(params.organization_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            priority: ActiveValue::Set(params.priority.as_str().to_string()),
            due_date: ActiveValue::Set(params.due_date),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut tags = Vec::with_capacity(params.tags.len());
        for name in params.tags {
            let tag = entity::task_tag::ActiveModel {
                task_id: ActiveValue::Set(task.id),
                name: ActiveValue::Set(name),
            }
            .insert(&txn)
            .await?;
            tags.push(tag);
        }

        txn.commit().await?;

        Ok((task, tags))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<TaskWithTags>, DbErr> {
        let Some(task) = entity::prelude::Task::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let tags = entity::prelude::TaskTag::find()
            .filter(entity::task_tag::Column::TaskId.eq(id))
            .all(self.db)
            .await?;

        Ok(Some((task, tags)))
    }

    /// Gets a page of the tasks owned by `user_id` or attached to one of `organization_ids`.
    ///
    /// Newest first.
    ///
    /// # Returns
    /// - `Ok((tasks, total))` - Page of tasks with tags and total matching count
    pub async fn get_visible_paginated(
        &self,
        user_id: i32,
        organization_ids: &[i32],
        filter: &TaskFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<TaskWithTags>, u64), DbErr> {
        let mut visibility = Condition::any().add(entity::task::Column::UserId.eq(user_id));
        if !organization_ids.is_empty() {
            visibility = visibility.add(
                entity::task::Column::OrganizationId.is_in(organization_ids.iter().copied()),
            );
        }

        let mut query = entity::prelude::Task::find().filter(visibility);

        if let Some(status) = filter.status {
            query = query.filter(entity::task::Column::Status.eq(status.as_str()));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(entity::task::Column::Priority.eq(priority.as_str()));
        }
        if let Some(organization_id) = filter.organization_id {
            query = query.filter(entity::task::Column::OrganizationId.eq(organization_id));
        }
        if let Some(tag) = &filter.tag {
            let tagged: Vec<i32> = entity::prelude::TaskTag::find()
                .filter(entity::task_tag::Column::Name.eq(tag.trim()))
                .all(self.db)
                .await?
                .into_iter()
                .map(|t| t.task_id)
                .collect();
            query = query.filter(entity::task::Column::Id.is_in(tagged));
        }

        let paginator = query
            .order_by_desc(entity::task::Column::CreatedAt)
            .order_by_desc(entity::task::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let tasks = paginator.fetch_page(page).await?;

        let ids: Vec<i32> = tasks.iter().map(|t| t.id).collect();
        let mut tags_by_task: HashMap<i32, Vec<entity::task_tag::Model>> = HashMap::new();
        if !ids.is_empty() {
            for tag in entity::prelude::TaskTag::find()
                .filter(entity::task_tag::Column::TaskId.is_in(ids))
                .all(self.db)
                .await?
            {
                tags_by_task.entry(tag.task_id).or_default().push(tag);
            }
        }

        let tasks = tasks
            .into_iter()
            .map(|task| {
                let tags = tags_by_task.remove(&task.id).unwrap_or_default();
                (task, tags)
            })
            .collect();

        Ok((tasks, total))
    }

    /// Applies a partial update; a provided tag list replaces the existing tags.
    pub async fn update(&self, params: UpdateTaskParams) -> Result<Option<TaskWithTags>, DbErr> {
        let Some(task) = entity::prelude::Task::find_by_id(params.id).one(self.db).await? else {
            return Ok(None);
        };

        let txn = self.db.begin().await?;

        let mut active = task.into_active_model();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(status) = params.status {
            active.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(priority) = params.priority {
            active.priority = ActiveValue::Set(priority.as_str().to_string());
        }
        if let Some(due_date) = params.due_date {
            active.due_date = ActiveValue::Set(Some(due_date));
        }
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(&txn).await?;

        if let Some(tags) = params.tags {
            entity::prelude::TaskTag::delete_many()
                .filter(entity::task_tag::Column::TaskId.eq(params.id))
                .exec(&txn)
                .await?;

            for name in tags {
                entity::task_tag::ActiveModel {
                    task_id: ActiveValue::Set(params.id),
                    name: ActiveValue::Set(name),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        self.find_by_id(params.id).await
    }

    /// Deletes the task; tags cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Task::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
