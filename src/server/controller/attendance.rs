use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        attendance::{
            AttendanceDto, AttendanceSummaryDto, CheckInDto, SummaryPeriod, UpdateAttendanceDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::attendance::AttendanceService,
        state::AppState,
        util::extract::{ValidJson, ValidQuery},
    },
};

/// Tag for grouping attendance endpoints in OpenAPI documentation
pub static ATTENDANCE_TAG: &str = "attendance";

#[derive(Deserialize)]
pub struct AttendanceRangeParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct SummaryParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub period: SummaryPeriod,
}

/// Resolves an optional date range to the current month up to today.
fn resolve_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    (from.unwrap_or(month_start), to.unwrap_or(today))
}

/// List the user's attendance records, oldest first.
///
/// Defaults to the current month up to today.
#[utoipa::path(
    get,
    path = "/api/attendance",
    tag = ATTENDANCE_TAG,
    params(
        ("from" = Option<NaiveDate>, Query, description = "First date (default: start of month)"),
        ("to" = Option<NaiveDate>, Query, description = "Last date (default: today)")
    ),
    responses(
        (status = 200, description = "Attendance records", body = Vec<AttendanceDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "'from' after 'to'", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_attendance(
    State(state): State<AppState>,
    session: Session,
    ValidQuery(params): ValidQuery<AttendanceRangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let (from, to) = resolve_range(params.from, params.to);

    let records = AttendanceService::new(&state.db, state.attendance_policy)
        .get_range(user.id, from, to)
        .await?;

    Ok((
        StatusCode::OK,
        Json(records.into_iter().map(|r| r.into_dto()).collect::<Vec<_>>()),
    ))
}

/// Check in for today. Arriving after the configured start of the work day marks the record
/// as late.
#[utoipa::path(
    post,
    path = "/api/attendance/check_in",
    tag = ATTENDANCE_TAG,
    request_body = CheckInDto,
    responses(
        (status = 201, description = "Checked in", body = AttendanceDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "Already checked in today", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_in(
    State(state): State<AppState>,
    session: Session,
    ValidJson(payload): ValidJson<CheckInDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let record = AttendanceService::new(&state.db, state.attendance_policy)
        .check_in(user.id, payload.note, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(record.into_dto())))
}

/// Check out for today, computing work and overtime hours.
#[utoipa::path(
    post,
    path = "/api/attendance/check_out",
    tag = ATTENDANCE_TAG,
    responses(
        (status = 200, description = "Checked out", body = AttendanceDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "Not checked in or already checked out", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_out(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let record = AttendanceService::new(&state.db, state.attendance_policy)
        .check_out(user.id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(record.into_dto())))
}

/// Correct the times of one of the user's records.
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    tag = ATTENDANCE_TAG,
    params(("id" = i32, Path, description = "Attendance record ID")),
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Record updated", body = AttendanceDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Record not found", body = ErrorDto),
        (status = 422, description = "Check-out before check-in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_attendance(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<UpdateAttendanceDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let record = AttendanceService::new(&state.db, state.attendance_policy)
        .update(id, user.id, payload, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(record.into_dto())))
}

/// Summarize work and overtime hours in day, week or month buckets.
///
/// Weeks start on Monday. Buckets without records are omitted.
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    tag = ATTENDANCE_TAG,
    params(
        ("from" = Option<NaiveDate>, Query, description = "First date (default: start of month)"),
        ("to" = Option<NaiveDate>, Query, description = "Last date (default: today)"),
        ("period" = Option<SummaryPeriod>, Query, description = "Bucket width (default: day)")
    ),
    responses(
        (status = 200, description = "Attendance summary", body = AttendanceSummaryDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "'from' after 'to'", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_summary(
    State(state): State<AppState>,
    session: Session,
    ValidQuery(params): ValidQuery<SummaryParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let (from, to) = resolve_range(params.from, params.to);

    let summary = AttendanceService::new(&state.db, state.attendance_policy)
        .summary(user.id, from, to, params.period)
        .await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}
