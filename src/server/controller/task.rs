use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        task::{CreateTaskDto, PaginatedTasksDto, TaskDto, TaskPriority, TaskStatus, UpdateTaskDto},
    },
    server::{
        controller::{default_entries, page_window},
        error::AppError,
        middleware::auth::AuthGuard,
        model::task::{CreateTaskParams, TaskFilter, UpdateTaskParams},
        service::task::TaskService,
        state::AppState,
        util::extract::{ValidJson, ValidQuery},
    },
};

/// Tag for grouping task endpoints in OpenAPI documentation
pub static TASK_TAG: &str = "task";

#[derive(Deserialize)]
pub struct TaskListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub organization_id: Option<i32>,
    pub tag: Option<String>,
}

/// Create a task.
///
/// Setting `organization_id` shares the task with that organization's members; the creator
/// must belong to it.
///
/// # Returns
/// - `201 Created` - The stored task
/// - `403 Forbidden` - Not a member of the given organization
/// - `422 Unprocessable Entity` - Missing title
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = TASK_TAG,
    request_body = CreateTaskDto,
    responses(
        (status = 201, description = "Task created", body = TaskDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the organization", body = ErrorDto),
        (status = 422, description = "Title missing", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_task(
    State(state): State<AppState>,
    session: Session,
    ValidJson(payload): ValidJson<CreateTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let task = TaskService::new(&state.db)
        .create(CreateTaskParams::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(task.into_dto())))
}

/// List tasks visible to the user: their own plus those shared with their organizations.
///
/// # Arguments
/// - `page` - Zero-indexed page number (default: 0)
/// - `entries` - Tasks per page (default: 10, max: 100)
/// - `status`, `priority`, `organization_id`, `tag` - Optional filters
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = TASK_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Entries per page (default: 10)"),
        ("status" = Option<TaskStatus>, Query, description = "Filter by status"),
        ("priority" = Option<TaskPriority>, Query, description = "Filter by priority"),
        ("organization_id" = Option<i32>, Query, description = "Filter by organization"),
        ("tag" = Option<String>, Query, description = "Filter by tag")
    ),
    responses(
        (status = 200, description = "Page of tasks", body = PaginatedTasksDto),
        (status = 400, description = "Malformed query", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tasks(
    State(state): State<AppState>,
    session: Session,
    ValidQuery(params): ValidQuery<TaskListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let filter = TaskFilter {
        status: params.status,
        priority: params.priority,
        organization_id: params.organization_id,
        tag: params.tag,
    };

    let (page, entries) = page_window(params.page, params.entries)?;

    let tasks = TaskService::new(&state.db)
        .get_paginated(&user, filter, page, entries)
        .await?;

    Ok((StatusCode::OK, Json(tasks.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task", body = TaskDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Task not found or not visible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_task(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let task = TaskService::new(&state.db).get(id, &user).await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}

/// Update a task. Omitted fields are left unchanged; `tags` replaces the whole set.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTaskDto,
    responses(
        (status = 200, description = "Task updated", body = TaskDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Task not found or not visible", body = ErrorDto),
        (status = 422, description = "Title empty", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_task(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<UpdateTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let task = TaskService::new(&state.db)
        .update(UpdateTaskParams::from_dto(id, payload), &user)
        .await?;

    Ok((StatusCode::OK, Json(task.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the task owner", body = ErrorDto),
        (status = 404, description = "Task not found or not visible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_task(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    TaskService::new(&state.db).delete(id, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}
