use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::attendance::{AttendanceStatus, SummaryPeriod, UpdateAttendanceDto},
    server::{
        data::attendance::AttendanceRepository,
        error::AppError,
        model::attendance::{
            Attendance, AttendancePolicy, AttendanceSummary, CheckInParams, RecordTimesParams,
        },
    },
};

pub struct AttendanceService<'a> {
    db: &'a DatabaseConnection,
    policy: AttendancePolicy,
}

impl<'a> AttendanceService<'a> {
    pub fn new(db: &'a DatabaseConnection, policy: AttendancePolicy) -> Self {
        Self { db, policy }
    }

    /// Records the user's arrival for the UTC date of `now`.
    ///
    /// # Returns
    /// - `Err(AppError::Validation)` - Already checked in today
    pub async fn check_in(
        &self,
        user_id: i32,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Attendance, AppError> {
        let repo = AttendanceRepository::new(self.db);
        let today = now.date_naive();

        if repo.find_by_user_and_date(user_id, today).await?.is_some() {
            return Err(AppError::validation("Already checked in today"));
        }

        let record = repo
            .create_check_in(CheckInParams {
                user_id,
                date: today,
                check_in_at: now,
                status: self.policy.status_for_check_in(now),
                note: note.filter(|n| !n.trim().is_empty()),
            })
            .await?;

        Attendance::from_entity(record)
    }

    /// Closes today's open record and computes the worked hours.
    ///
    /// # Returns
    /// - `Err(AppError::Validation)` - No open record today, or `now` precedes the check-in
    pub async fn check_out(&self, user_id: i32, now: DateTime<Utc>) -> Result<Attendance, AppError> {
        let repo = AttendanceRepository::new(self.db);

        let Some(record) = repo.find_by_user_and_date(user_id, now.date_naive()).await? else {
            return Err(AppError::validation("Not checked in today"));
        };
        let record = Attendance::from_entity(record)?;

        let Some(check_in_at) = record.check_in_at else {
            return Err(AppError::validation("Not checked in today"));
        };
        if record.check_out_at.is_some() {
            return Err(AppError::validation("Already checked out today"));
        }
        if now < check_in_at {
            return Err(AppError::validation("Check-out cannot be before check-in"));
        }

        let (work_hours, overtime_hours) = self.policy.hours(check_in_at, now);

        let updated = repo
            .update_times(RecordTimesParams {
                id: record.id,
                check_in_at,
                check_out_at: Some(now),
                status: self.policy.status_for_check_in(check_in_at),
                work_hours,
                overtime_hours,
                note: record.note,
            })
            .await?
            .ok_or_else(|| AppError::not_found("Attendance record"))?;

        Attendance::from_entity(updated)
    }

    /// Corrects a record's times and recomputes its status and hours.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Missing or owned by someone else
    /// - `Err(AppError::Validation)` - Check-out before check-in
    pub async fn update(
        &self,
        id: i32,
        user_id: i32,
        dto: UpdateAttendanceDto,
        now: DateTime<Utc>,
    ) -> Result<Attendance, AppError> {
        let repo = AttendanceRepository::new(self.db);

        let record = repo
            .find_by_id(id)
            .await?
            .filter(|r| r.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Attendance record"))?;

        let (status, work_hours, overtime_hours) = match dto.check_out_at {
            Some(check_out_at) => {
                if check_out_at < dto.check_in_at {
                    return Err(AppError::validation("Check-out cannot be before check-in"));
                }
                let (work, overtime) = self.policy.hours(dto.check_in_at, check_out_at);
                (self.policy.status_for_check_in(dto.check_in_at), work, overtime)
            }
            None if record.date < now.date_naive() => (AttendanceStatus::MissingCheckout, 0.0, 0.0),
            None => (self.policy.status_for_check_in(dto.check_in_at), 0.0, 0.0),
        };

        let updated = repo
            .update_times(RecordTimesParams {
                id,
                check_in_at: dto.check_in_at,
                check_out_at: dto.check_out_at,
                status,
                work_hours,
                overtime_hours,
                note: dto.note.filter(|n| !n.trim().is_empty()),
            })
            .await?
            .ok_or_else(|| AppError::not_found("Attendance record"))?;

        Attendance::from_entity(updated)
    }

    /// The user's records dated within `from..=to`.
    pub async fn get_range(
        &self,
        user_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Attendance>, AppError> {
        if from > to {
            return Err(AppError::validation("'from' must not be after 'to'"));
        }

        AttendanceRepository::new(self.db)
            .get_range(user_id, from, to)
            .await?
            .into_iter()
            .map(Attendance::from_entity)
            .collect()
    }

    /// Aggregates the user's records into day, week or month buckets.
    pub async fn summary(
        &self,
        user_id: i32,
        from: NaiveDate,
        to: NaiveDate,
        period: SummaryPeriod,
    ) -> Result<AttendanceSummary, AppError> {
        let records = self.get_range(user_id, from, to).await?;

        Ok(AttendanceSummary::build(&records, from, to, period))
    }

    /// Flags open records from days before `today`.
    pub async fn mark_missing_checkouts(&self, today: NaiveDate) -> Result<u64, AppError> {
        Ok(AttendanceRepository::new(self.db)
            .mark_missing_checkouts(today)
            .await?)
    }
}
