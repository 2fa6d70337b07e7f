use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        meeting::{CreateMeetingDto, MeetingDto, UpdateMeetingDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::meeting::{CreateMeetingParams, MeetingRange, UpdateMeetingParams},
        service::meeting::MeetingService,
        state::AppState,
        util::extract::{ValidJson, ValidQuery},
    },
};

/// Tag for grouping meeting endpoints in OpenAPI documentation
pub static MEETING_TAG: &str = "meeting";

#[derive(Deserialize)]
pub struct MeetingListParams {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Schedule a meeting with the organizer and the listed participants.
#[utoipa::path(
    post,
    path = "/api/meetings",
    tag = MEETING_TAG,
    request_body = CreateMeetingDto,
    responses(
        (status = 201, description = "Meeting scheduled", body = MeetingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member of the organization", body = ErrorDto),
        (status = 404, description = "Participant not found", body = ErrorDto),
        (status = 422, description = "Missing title or invalid times", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_meeting(
    State(state): State<AppState>,
    session: Session,
    ValidJson(payload): ValidJson<CreateMeetingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let meeting = MeetingService::new(&state.db)
        .create(CreateMeetingParams::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(meeting.into_dto())))
}

/// List meetings the user organizes or attends, by start time. Upcoming meetings by default.
#[utoipa::path(
    get,
    path = "/api/meetings",
    tag = MEETING_TAG,
    params(
        ("from" = Option<String>, Query, description = "Earliest start, RFC 3339 (default: now)"),
        ("to" = Option<String>, Query, description = "Latest start, RFC 3339")
    ),
    responses(
        (status = 200, description = "Meetings", body = Vec<MeetingDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "'from' after 'to'", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_meetings(
    State(state): State<AppState>,
    session: Session,
    ValidQuery(params): ValidQuery<MeetingListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let range = MeetingRange {
        from: params.from,
        to: params.to,
    };

    let meetings = MeetingService::new(&state.db)
        .get_for_user(user.id, range, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(meetings.into_iter().map(|m| m.into_dto()).collect::<Vec<_>>()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/meetings/{id}",
    tag = MEETING_TAG,
    params(("id" = i32, Path, description = "Meeting ID")),
    responses(
        (status = 200, description = "Meeting", body = MeetingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Meeting not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_meeting(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let meeting = MeetingService::new(&state.db).get(id, user.id).await?;

    Ok((StatusCode::OK, Json(meeting.into_dto())))
}

/// Reschedule or edit a meeting. Organizer only; `participant_ids` replaces the whole list.
#[utoipa::path(
    put,
    path = "/api/meetings/{id}",
    tag = MEETING_TAG,
    params(("id" = i32, Path, description = "Meeting ID")),
    request_body = UpdateMeetingDto,
    responses(
        (status = 200, description = "Meeting updated", body = MeetingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the organizer", body = ErrorDto),
        (status = 404, description = "Meeting or participant not found", body = ErrorDto),
        (status = 422, description = "Invalid title or times", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_meeting(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<UpdateMeetingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let meeting = MeetingService::new(&state.db)
        .update(UpdateMeetingParams::from_dto(id, user.id, payload), user.id)
        .await?;

    Ok((StatusCode::OK, Json(meeting.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/meetings/{id}",
    tag = MEETING_TAG,
    params(("id" = i32, Path, description = "Meeting ID")),
    responses(
        (status = 204, description = "Meeting cancelled"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the organizer", body = ErrorDto),
        (status = 404, description = "Meeting not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_meeting(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    MeetingService::new(&state.db).delete(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
