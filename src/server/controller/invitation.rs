use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        invitation::{CreateInvitationDto, InvitationDto, JoinInvitationDto},
        organization::OrganizationDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::invitation::InvitationService,
        state::AppState,
        util::extract::ValidJson,
    },
};

/// Tag for grouping invitation endpoints in OpenAPI documentation
pub static INVITATION_TAG: &str = "invitation";

/// Create an invitation code for an organization.
///
/// Both limits are optional; an invitation without them never expires and admits any number
/// of users.
///
/// # Access Control
/// - `OrganizationManager` - Organization owner or admin
///
/// # Returns
/// - `201 Created` - Invitation with its generated code
/// - `422 Unprocessable Entity` - Non-positive expiry or usage limit
#[utoipa::path(
    post,
    path = "/api/organizations/{id}/invitations",
    tag = INVITATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    request_body = CreateInvitationDto,
    responses(
        (status = 201, description = "Invitation created", body = InvitationDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an organization manager", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 422, description = "Invalid limits", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_invitation(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<CreateInvitationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationManager(id)])
        .await?;

    let invitation = InvitationService::new(&state.db)
        .create(id, user.id, payload, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(invitation.into_dto())))
}

/// List an organization's invitation codes, newest first.
#[utoipa::path(
    get,
    path = "/api/organizations/{id}/invitations",
    tag = INVITATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Invitations", body = Vec<InvitationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an organization manager", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_invitations(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationManager(id)])
        .await?;

    let invitations = InvitationService::new(&state.db)
        .get_by_organization(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(
            invitations
                .into_iter()
                .map(|i| i.into_dto())
                .collect::<Vec<_>>(),
        ),
    ))
}

/// Revoke an invitation code.
#[utoipa::path(
    delete,
    path = "/api/organizations/{id}/invitations/{invitation_id}",
    tag = INVITATION_TAG,
    params(
        ("id" = i32, Path, description = "Organization ID"),
        ("invitation_id" = i32, Path, description = "Invitation ID")
    ),
    responses(
        (status = 204, description = "Invitation revoked"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an organization manager", body = ErrorDto),
        (status = 404, description = "Organization or invitation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_invitation(
    State(state): State<AppState>,
    session: Session,
    Path((id, invitation_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::OrganizationManager(id)])
        .await?;

    InvitationService::new(&state.db)
        .revoke(id, invitation_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Join an organization with an invitation code.
///
/// Codes are matched case-insensitively. A successful join consumes one use.
///
/// # Returns
/// - `200 OK` - The organization joined
/// - `404 Not Found` - Unknown code
/// - `422 Unprocessable Entity` - Expired, exhausted, or already a member
#[utoipa::path(
    post,
    path = "/api/invitations/join",
    tag = INVITATION_TAG,
    request_body = JoinInvitationDto,
    responses(
        (status = 200, description = "Joined organization", body = OrganizationDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Unknown invitation code", body = ErrorDto),
        (status = 422, description = "Invitation expired or used up, or already a member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_organization(
    State(state): State<AppState>,
    session: Session,
    ValidJson(payload): ValidJson<JoinInvitationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let organization = InvitationService::new(&state.db)
        .join(&payload.code, user.id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(organization.into_dto())))
}
