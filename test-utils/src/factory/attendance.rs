//! Attendance factory for seeding daily records.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct AttendanceFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    date: NaiveDate,
    check_in_at: Option<DateTime<Utc>>,
    check_out_at: Option<DateTime<Utc>>,
    status: String,
    work_hours: f64,
    overtime_hours: f64,
}

impl<'a> AttendanceFactory<'a> {
    /// Defaults to a `present` record with no timestamps and zero hours.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, date: NaiveDate) -> Self {
        Self {
            db,
            user_id,
            date,
            check_in_at: None,
            check_out_at: None,
            status: "present".to_string(),
            work_hours: 0.0,
            overtime_hours: 0.0,
        }
    }

    pub fn check_in_at(mut self, check_in_at: DateTime<Utc>) -> Self {
        self.check_in_at = Some(check_in_at);
        self
    }

    pub fn check_out_at(mut self, check_out_at: DateTime<Utc>) -> Self {
        self.check_out_at = Some(check_out_at);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn hours(mut self, work_hours: f64, overtime_hours: f64) -> Self {
        self.work_hours = work_hours;
        self.overtime_hours = overtime_hours;
        self
    }

    pub async fn build(self) -> Result<entity::attendance::Model, DbErr> {
        entity::attendance::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            date: ActiveValue::Set(self.date),
            check_in_at: ActiveValue::Set(self.check_in_at),
            check_out_at: ActiveValue::Set(self.check_out_at),
            status: ActiveValue::Set(self.status),
            work_hours: ActiveValue::Set(self.work_hours),
            overtime_hours: ActiveValue::Set(self.overtime_hours),
            note: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
