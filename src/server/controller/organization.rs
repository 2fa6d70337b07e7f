use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        organization::{
            CreateOrganizationDto, OrganizationDto, OrganizationMemberDto, UpdateMemberRoleDto,
            UpdateOrganizationDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::organization::{CreateOrganizationParams, UpdateOrganizationParams},
        service::organization::OrganizationService,
        state::AppState,
        util::extract::ValidJson,
    },
};

/// Tag for grouping organization endpoints in OpenAPI documentation
pub static ORGANIZATION_TAG: &str = "organization";

/// Create an organization. The creator becomes its owner.
#[utoipa::path(
    post,
    path = "/api/organizations",
    tag = ORGANIZATION_TAG,
    request_body = CreateOrganizationDto,
    responses(
        (status = 201, description = "Organization created", body = OrganizationDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "Name missing", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_organization(
    State(state): State<AppState>,
    session: Session,
    ValidJson(payload): ValidJson<CreateOrganizationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let organization = OrganizationService::new(&state.db)
        .create(CreateOrganizationParams::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(organization.into_dto())))
}

/// List the organizations the current user belongs to.
#[utoipa::path(
    get,
    path = "/api/organizations",
    tag = ORGANIZATION_TAG,
    responses(
        (status = 200, description = "Organizations of the user", body = Vec<OrganizationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_organizations(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let organizations = OrganizationService::new(&state.db)
        .get_for_user(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(
            organizations
                .into_iter()
                .map(|o| o.into_dto())
                .collect::<Vec<_>>(),
        ),
    ))
}

/// Get an organization the user is a member of.
#[utoipa::path(
    get,
    path = "/api/organizations/{id}",
    tag = ORGANIZATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization", body = OrganizationDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_organization(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationMember(id)])
        .await?;

    let organization = OrganizationService::new(&state.db)
        .get_for_member(id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(organization.into_dto())))
}

/// Update an organization's name or description. Owner or admin only.
#[utoipa::path(
    put,
    path = "/api/organizations/{id}",
    tag = ORGANIZATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    request_body = UpdateOrganizationDto,
    responses(
        (status = 200, description = "Organization updated", body = OrganizationDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an owner or admin", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 422, description = "Name empty", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_organization(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<UpdateOrganizationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationManager(id)])
        .await?;

    let organization = OrganizationService::new(&state.db)
        .update(UpdateOrganizationParams::from_dto(id, payload), user.id)
        .await?;

    Ok((StatusCode::OK, Json(organization.into_dto())))
}

/// Delete an organization. Owner only.
#[utoipa::path(
    delete,
    path = "/api/organizations/{id}",
    tag = ORGANIZATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    responses(
        (status = 204, description = "Organization deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationOwner(id)])
        .await?;

    OrganizationService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List members of an organization.
#[utoipa::path(
    get,
    path = "/api/organizations/{id}/members",
    tag = ORGANIZATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Members", body = Vec<OrganizationMemberDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_members(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationMember(id)])
        .await?;

    let members = OrganizationService::new(&state.db).get_members(id).await?;

    Ok((
        StatusCode::OK,
        Json(members.into_iter().map(|m| m.into_dto()).collect::<Vec<_>>()),
    ))
}

/// Change a member's role. Owner only.
#[utoipa::path(
    put,
    path = "/api/organizations/{id}/members/{user_id}",
    tag = ORGANIZATION_TAG,
    params(
        ("id" = i32, Path, description = "Organization ID"),
        ("user_id" = i32, Path, description = "Member user ID")
    ),
    request_body = UpdateMemberRoleDto,
    responses(
        (status = 200, description = "Role changed", body = OrganizationMemberDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Organization or member not found", body = ErrorDto),
        (status = 422, description = "Role cannot be assigned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_member_role(
    State(state): State<AppState>,
    session: Session,
    Path((id, user_id)): Path<(i32, i32)>,
    ValidJson(payload): ValidJson<UpdateMemberRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationOwner(id)])
        .await?;

    let member = OrganizationService::new(&state.db)
        .change_role(id, user_id, payload.role)
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}

/// Remove a member. Owner or admin only; the owner cannot be removed.
#[utoipa::path(
    delete,
    path = "/api/organizations/{id}/members/{user_id}",
    tag = ORGANIZATION_TAG,
    params(
        ("id" = i32, Path, description = "Organization ID"),
        ("user_id" = i32, Path, description = "Member user ID")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an owner or admin", body = ErrorDto),
        (status = 404, description = "Organization or member not found", body = ErrorDto),
        (status = 422, description = "Owner cannot be removed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_member(
    State(state): State<AppState>,
    session: Session,
    Path((id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationManager(id)])
        .await?;

    OrganizationService::new(&state.db)
        .remove_member(id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Leave an organization.
#[utoipa::path(
    post,
    path = "/api/organizations/{id}/leave",
    tag = ORGANIZATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    responses(
        (status = 204, description = "Left the organization"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 422, description = "Owner cannot leave", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_organization(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationMember(id)])
        .await?;

    OrganizationService::new(&state.db).leave(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
