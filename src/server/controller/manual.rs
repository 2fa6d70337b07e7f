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
        manual::{CreateManualDto, ManualDto, PaginatedManualsDto, UpdateManualDto},
    },
    server::{
        controller::{default_entries, page_window},
        error::AppError,
        middleware::auth::AuthGuard,
        model::manual::{CreateManualParams, ManualFilter, UpdateManualParams},
        service::manual::ManualService,
        state::AppState,
        util::extract::{ValidJson, ValidQuery},
    },
};

/// Tag for grouping manual endpoints in OpenAPI documentation
pub static MANUAL_TAG: &str = "manual";

#[derive(Deserialize)]
pub struct ManualListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub department: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Write a manual. Its department defaults to the author's.
#[utoipa::path(
    post,
    path = "/api/manuals",
    tag = MANUAL_TAG,
    request_body = CreateManualDto,
    responses(
        (status = 201, description = "Manual created", body = ManualDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "Title or content missing", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_manual(
    State(state): State<AppState>,
    session: Session,
    ValidJson(payload): ValidJson<CreateManualDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let manual = ManualService::new(&state.db)
        .create(CreateManualParams::from_dto(&user, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(manual.into_dto(&user))))
}

/// List manuals the user may read.
///
/// `search` matches against titles.
#[utoipa::path(
    get,
    path = "/api/manuals",
    tag = MANUAL_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Entries per page (default: 10)"),
        ("department" = Option<String>, Query, description = "Filter by department"),
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("search" = Option<String>, Query, description = "Search titles")
    ),
    responses(
        (status = 200, description = "Page of manuals", body = PaginatedManualsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_manuals(
    State(state): State<AppState>,
    session: Session,
    ValidQuery(params): ValidQuery<ManualListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let filter = ManualFilter {
        department: params.department,
        category: params.category,
        search: params.search.filter(|s| !s.trim().is_empty()),
    };

    let (page, entries) = page_window(params.page, params.entries)?;

    let manuals = ManualService::new(&state.db)
        .get_paginated(&user, filter, page, entries)
        .await?;

    Ok((StatusCode::OK, Json(manuals.into_dto(&user))))
}

#[utoipa::path(
    get,
    path = "/api/manuals/{id}",
    tag = MANUAL_TAG,
    params(("id" = i32, Path, description = "Manual ID")),
    responses(
        (status = 200, description = "Manual", body = ManualDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Manual not found or not visible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_manual(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let manual = ManualService::new(&state.db).get(id, &user).await?;

    Ok((StatusCode::OK, Json(manual.into_dto(&user))))
}

#[utoipa::path(
    put,
    path = "/api/manuals/{id}",
    tag = MANUAL_TAG,
    params(("id" = i32, Path, description = "Manual ID")),
    request_body = UpdateManualDto,
    responses(
        (status = 200, description = "Manual updated", body = ManualDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed to edit", body = ErrorDto),
        (status = 404, description = "Manual not found or not visible", body = ErrorDto),
        (status = 422, description = "Title or content empty", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_manual(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<UpdateManualDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let manual = ManualService::new(&state.db)
        .update(UpdateManualParams::from_dto(id, payload), &user)
        .await?;

    Ok((StatusCode::OK, Json(manual.into_dto(&user))))
}

/// Delete a manual. Its author or a site admin only.
#[utoipa::path(
    delete,
    path = "/api/manuals/{id}",
    tag = MANUAL_TAG,
    params(("id" = i32, Path, description = "Manual ID")),
    responses(
        (status = 204, description = "Manual deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the author or an admin", body = ErrorDto),
        (status = 404, description = "Manual not found or not visible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_manual(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ManualService::new(&state.db).delete(id, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}
