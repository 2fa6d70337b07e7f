use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        organization::OrganizationRepository,
        task::{TaskRepository, TaskWithTags},
    },
    error::{auth::AuthError, AppError},
    model::{
        task::{CreateTaskParams, PaginatedTasks, Task, TaskFilter, UpdateTaskParams},
        total_pages,
        user::User,
    },
    service::organization::OrganizationService,
};

pub struct TaskService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaskService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a task for the user, optionally shared with one of their organizations.
    ///
    /// # Returns
    /// - `Err(AppError::Validation)` - Title empty after trimming; nothing is persisted
    /// - `Err(AuthError::AccessDenied)` - User is not in the given organization
    pub async fn create(&self, params: CreateTaskParams) -> Result<Task, AppError> {
        if params.title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }

        if let Some(organization_id) = params.organization_id {
            OrganizationService::new(self.db)
                .ensure_member(organization_id, params.user_id)
                .await?;
        }

        let (task, tags) = TaskRepository::new(self.db).create(params).await?;

        Task::from_entity(task, tags)
    }

    /// Gets a task visible to the user. Invisible tasks answer 404.
    pub async fn get(&self, id: i32, user: &User) -> Result<Task, AppError> {
        let (task, tags) = self.find_visible(id, user).await?;

        Task::from_entity(task, tags)
    }

    pub async fn get_paginated(
        &self,
        user: &User,
        filter: TaskFilter,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedTasks, AppError> {
        let organization_ids = OrganizationRepository::new(self.db)
            .organization_ids_for_user(user.id)
            .await?;

        let (tasks, total) = TaskRepository::new(self.db)
            .get_visible_paginated(user.id, &organization_ids, &filter, page, per_page)
            .await?;

        let tasks: Result<Vec<_>, _> = tasks
            .into_iter()
            .map(|(task, tags)| Task::from_entity(task, tags))
            .collect();

        Ok(PaginatedTasks {
            tasks: tasks?,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Updates a task visible to the user; organization members may edit shared tasks.
    pub async fn update(&self, params: UpdateTaskParams, user: &User) -> Result<Task, AppError> {
        if params.title.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::validation("Title is required"));
        }

        self.find_visible(params.id, user).await?;

        let (task, tags) = TaskRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| AppError::not_found("Task"))?;

        Task::from_entity(task, tags)
    }

    /// Deletes a task. Only its owner may delete it.
    pub async fn delete(&self, id: i32, user: &User) -> Result<(), AppError> {
        let (task, _) = self.find_visible(id, user).await?;

        if task.user_id != user.id {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("only the owner can delete task {}", id),
            )
            .into());
        }

        TaskRepository::new(self.db).delete(id).await?;

        Ok(())
    }

    async fn find_visible(&self, id: i32, user: &User) -> Result<TaskWithTags, AppError> {
        let Some((task, tags)) = TaskRepository::new(self.db).find_by_id(id).await? else {
            return Err(AppError::not_found("Task"));
        };

        if task.user_id == user.id {
            return Ok((task, tags));
        }

        if let Some(organization_id) = task.organization_id {
            if OrganizationRepository::new(self.db)
                .find_member(organization_id, user.id)
                .await?
                .is_some()
            {
                return Ok((task, tags));
            }
        }

        Err(AppError::not_found("Task"))
    }
}
